//! Google sign-up: pick an account type, then complete the Google popup.
//!
//! Admin accounts cannot be created through Google; only the roles in
//! [`GOOGLE_SIGNUP_ROLES`] are offered.

#[cfg(test)]
#[path = "google_role_test.rs"]
mod google_role_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::auth::AppAuth;
use crate::net::types::Role;
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::util::auth::{replace_history, sign_in_destination, sync_auth_state};

pub const GOOGLE_SIGNUP_ROLES: [Role; 2] = [Role::Homeowner, Role::Estate];

/// Parse a role choice, accepting only self-service roles.
pub fn parse_signup_role(raw: &str) -> Option<Role> {
    Role::parse(raw).filter(|role| GOOGLE_SIGNUP_ROLES.contains(role))
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Homeowner => "I'm a homeowner",
        Role::Estate => "I manage an estate",
        Role::Admin => "Administrator",
    }
}

#[component]
pub fn GoogleRolePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();
    let navigate = use_navigate();

    let choice = RwSignal::new(None::<Role>);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_continue = move |_| {
        if busy.get() {
            return;
        }
        let Some(role) = choice.get() else {
            info.set("Choose an account type first.".to_owned());
            return;
        };
        busy.set(true);
        info.set("Waiting for Google...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = coordinator.google_sign_up(role).await;
                sync_auth_state(auth, coordinator.session(), false);
                match sign_in_destination(&result, None) {
                    Ok(path) => navigate(&path, replace_history()),
                    Err(msg) => info.set(msg),
                }
                busy.set(false);
            });
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign up with Google"</h1>
                <p class="auth-card__subtitle">"How will you use Qring?"</p>
                <div class="role-picker">
                    {GOOGLE_SIGNUP_ROLES
                        .into_iter()
                        .map(|role| {
                            view! {
                                <button
                                    class=move || {
                                        if choice.get() == Some(role) {
                                            "role-picker__option role-picker__option--active"
                                        } else {
                                            "role-picker__option"
                                        }
                                    }
                                    on:click=move |_| choice.set(parse_signup_role(role.as_str()))
                                >
                                    {role_label(role)}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <button class="auth-button auth-button--google" disabled=move || busy.get() on:click=on_continue>
                    "Continue with Google"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <nav class="auth-links">
                    <a href="/login">"Already registered? Sign in"</a>
                </nav>
            </div>
        </div>
    }
}
