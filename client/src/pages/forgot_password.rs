//! Request a password-reset code by email.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use super::form_rules::require_email;
use crate::auth::AppAuth;

pub const RESET_PASSWORD_PATH: &str = "/reset-password";

/// Link to the reset form with the email pre-filled.
pub fn reset_link(email: &str) -> String {
    format!("{RESET_PASSWORD_PATH}?email={}", utf8_percent_encode(email, NON_ALPHANUMERIC))
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let coordinator = expect_context::<AppAuth>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let sent_to = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match require_email(&email.get()) {
            Ok(value) => value,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Sending reset code...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator.clone();
            leptos::task::spawn_local(async move {
                match coordinator.forgot_password(&email_value).await {
                    Ok(message) => {
                        info.set(message);
                        sent_to.set(Some(email_value));
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
    };

    let on_continue = move |_| {
        if let Some(email) = sent_to.get() {
            navigate(&reset_link(&email), Default::default());
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Forgot password"</h1>
                <p class="auth-card__subtitle">"We'll email you a reset code."</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Send Code"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <button class="auth-button" hidden=move || sent_to.get().is_none() on:click=on_continue>
                    "I have a code"
                </button>
                <nav class="auth-links">
                    <a href="/login">"Back to sign in"</a>
                </nav>
            </div>
        </div>
    }
}
