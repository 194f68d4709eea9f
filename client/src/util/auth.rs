//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every sign-in form (password, Google, sign-up) finishes the same way:
//! refresh the reactive auth view, then leave the auth page with history
//! replacement toward either the preserved destination or the role's landing
//! dashboard.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::auth::error::AuthError;
use crate::auth::gate::post_login_destination;
use crate::state::auth::AuthState;
use crate::state::session::{Session, SessionStore};

/// Navigation options for every gate and auth redirect.
pub fn replace_history() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Push the session store's current contents into the reactive auth view.
pub fn sync_auth_state(auth: RwSignal<AuthState>, session: &SessionStore, loading: bool) {
    auth.set(AuthState::from_session(&session.get(), loading));
}

/// Resolve a sign-in result to a destination path or a form message.
///
/// # Errors
///
/// The single-line message to show on the form.
pub fn sign_in_destination(result: &Result<Session, AuthError>, redirect: Option<&str>) -> Result<String, String> {
    let session = result.as_ref().map_err(ToString::to_string)?;
    let user = session.user.as_ref().ok_or_else(|| AuthError::MissingToken.to_string())?;
    post_login_destination(redirect, user).map_err(|e| e.to_string())
}

/// Where an already signed-in visitor to an auth page should go, if anywhere.
///
/// Nothing is decided while the session is still loading or anonymous. The
/// preserved `redirect` is honored the same way a fresh sign-in honors it.
pub fn signed_in_redirect(state: &AuthState, session: &Session, redirect: Option<&str>) -> Option<String> {
    if state.loading || !state.authenticated {
        return None;
    }
    sign_in_destination(&Ok(session.clone()), redirect).ok()
}

/// Send already signed-in visitors away from an auth page, toward the
/// preserved `redirect` when there is one.
pub fn install_signed_in_redirect<F>(
    auth: RwSignal<AuthState>,
    session: SessionStore,
    redirect: Option<String>,
    navigate: F,
) where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if let Some(path) = signed_in_redirect(&state, &session.get(), redirect.as_deref()) {
            navigate(&path, replace_history());
        }
    });
}
