//! Authentication and route authorization.
//!
//! SYSTEM CONTEXT
//! ==============
//! `coordinator` performs auth operations against the backend and writes the
//! session store; `gate` reads the session store to permit or redirect
//! navigations. Both report failures through `error::AuthError`.

pub mod coordinator;
pub mod error;
pub mod gate;

use crate::net::api::{GoogleIdentity, HttpApi};

/// Coordinator wired to the real backend and Google Identity.
pub type AppAuth = coordinator::AuthCoordinator<HttpApi, GoogleIdentity>;
