//! Change the signed-in user's password.

#[cfg(test)]
#[path = "change_password_test.rs"]
mod change_password_test;

use leptos::prelude::*;

use super::form_rules::check_new_password;
use crate::auth::AppAuth;
use crate::auth::gate::{RoutePolicy, landing_for_user};
use crate::components::protected_route::Protected;
use crate::net::types::ChangePasswordRequest;
use crate::state::auth::AuthState;

/// Validate the change-password form.
///
/// # Errors
///
/// The first failing rule's form message.
pub fn validate_change_input(
    current: &str,
    password: &str,
    confirm: &str,
) -> Result<ChangePasswordRequest, &'static str> {
    if current.is_empty() {
        return Err("Enter your current password.");
    }
    check_new_password(password, confirm)?;
    if password == current {
        return Err("Choose a password different from the current one.");
    }
    Ok(ChangePasswordRequest { current_password: current.to_owned(), new_password: password.to_owned() })
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    view! {
        <Protected policy=RoutePolicy::authenticated()>
            <ChangePasswordForm/>
        </Protected>
    }
}

#[component]
fn ChangePasswordForm() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();

    let current = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_change_input(&current.get(), &password.get(), &confirm.get()) {
            Ok(request) => request,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Updating password...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator.clone();
            leptos::task::spawn_local(async move {
                match coordinator.change_password(&request).await {
                    Ok(message) => {
                        info.set(message);
                        current.set(String::new());
                        password.set(String::new());
                        confirm.set(String::new());
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
    };

    let back_href = move || {
        auth.get()
            .user
            .and_then(|user| landing_for_user(&user).ok())
            .unwrap_or("/")
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Change password"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Current password"
                        autocomplete="current-password"
                        prop:value=move || current.get()
                        on:input=move |ev| current.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="New password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Confirm new password"
                        autocomplete="new-password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Change Password"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <nav class="auth-links">
                    <a href=back_href>"Back to dashboard"</a>
                </nav>
            </div>
        </div>
    }
}
