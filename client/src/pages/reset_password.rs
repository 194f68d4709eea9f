//! Set a new password with the emailed one-time code.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use super::form_rules::{check_new_password, require_email};
use crate::auth::AppAuth;
use crate::net::types::ResetPasswordRequest;
use crate::util::auth::replace_history;

pub const OTP_LEN: usize = 6;

/// Validate the reset form.
///
/// # Errors
///
/// The first failing rule's form message.
pub fn validate_reset_input(
    email: &str,
    otp: &str,
    password: &str,
    confirm: &str,
) -> Result<ResetPasswordRequest, &'static str> {
    let email = require_email(email)?;
    let otp = otp.trim();
    if otp.len() != OTP_LEN || !otp.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Enter the 6-character code from your email.");
    }
    check_new_password(password, confirm)?;
    Ok(ResetPasswordRequest { email, otp: otp.to_owned(), new_password: password.to_owned() })
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let coordinator = expect_context::<AppAuth>();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(query.with_untracked(|q| q.get("email")).unwrap_or_default());
    let otp = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || done.get() {
            return;
        }
        let request = match validate_reset_input(&email.get(), &otp.get(), &password.get(), &confirm.get()) {
            Ok(request) => request,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Resetting password...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator.clone();
            leptos::task::spawn_local(async move {
                match coordinator.reset_password(&request).await {
                    Ok(message) => {
                        info.set(message);
                        done.set(true);
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
    };

    let on_sign_in = move |_| navigate("/login", replace_history());

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset password"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input auth-input--code"
                        type="text"
                        maxlength="6"
                        placeholder="Reset code"
                        autocomplete="one-time-code"
                        prop:value=move || otp.get()
                        on:input=move |ev| otp.set(event_target_value(&ev))
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
                    <button class="auth-button" type="submit" disabled=move || busy.get() || done.get()>
                        "Reset Password"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <button class="auth-button" hidden=move || !done.get() on:click=on_sign_in>
                    "Sign in"
                </button>
                <nav class="auth-links">
                    <a href="/forgot-password">"Send a new code"</a>
                </nav>
            </div>
        </div>
    }
}
