//! Networking modules for the Qring REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs HTTP calls, `envelope` flattens the backend's inconsistent
//! response wrapping, `token` peeks at JWT claims, and `types` defines the
//! wire schema.

pub mod api;
pub mod envelope;
pub mod token;
pub mod types;
