//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the persisted source of truth; `auth` is the reactive
//! projection components subscribe to.

pub mod auth;
pub mod session;
