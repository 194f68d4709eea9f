//! `/`: send visitors to their dashboard, or to sign-in.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::AppAuth;
use crate::auth::gate::{LOGIN_PATH, landing_for_user};
use crate::state::auth::AuthState;
use crate::state::session::Session;
use crate::util::auth::replace_history;

/// Dashboard for a signed-in session, `/login` otherwise.
///
/// # Errors
///
/// The unmapped-role message for a signed-in user without a dashboard.
pub fn home_destination(session: &Session) -> Result<&'static str, String> {
    match session.user.as_ref() {
        Some(user) if session.is_authenticated() => landing_for_user(user).map_err(|e| e.to_string()),
        _ => Ok(LOGIN_PATH),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();
    let navigate = use_navigate();
    let error = RwSignal::new(None::<String>);

    let session = coordinator.session().clone();
    Effect::new(move || {
        if auth.get().loading {
            return;
        }
        match home_destination(&session.get()) {
            Ok(path) => navigate(path, replace_history()),
            Err(msg) => error.set(Some(msg)),
        }
    });

    view! {
        <div class="auth-page">
            <Show when=move || error.get().is_some() fallback=|| view! { <p>"Loading..."</p> }>
                <div class="auth-card">
                    <p class="auth-message">{move || error.get().unwrap_or_default()}</p>
                    <a class="auth-button" href="/login">"Sign in with another account"</a>
                </div>
            </Show>
        </div>
    }
}
