//! Reactive auth view for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthState>` context. Pages refresh it from the
//! session store after every coordinator call so headers and guards re-render.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::Session;
use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn from_session(session: &Session, loading: bool) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            user: session.user.clone(),
            loading,
        }
    }
}
