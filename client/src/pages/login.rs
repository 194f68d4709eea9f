//! Login page: email + password, or Google for linked accounts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route gate sends anonymous visitors here with the attempted path in
//! `?redirect=`. A successful sign-in returns there, or to the role's landing
//! dashboard when no safe redirect was carried.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::auth::AppAuth;
use crate::auth::gate::REDIRECT_PARAM;
use crate::config::ClientConfig;
use crate::net::types::Credentials;
use crate::state::auth::AuthState;
use crate::util::auth::install_signed_in_redirect;
#[cfg(feature = "hydrate")]
use crate::util::auth::{replace_history, sign_in_destination, sync_auth_state};

/// Trim the email and require both fields.
///
/// # Errors
///
/// The message to show on the form.
pub fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();
    let config = expect_context::<ClientConfig>();
    let query = use_query_map();
    let navigate = use_navigate();

    let redirect = move || query.with_untracked(|q| q.get(REDIRECT_PARAM));

    install_signed_in_redirect(auth, coordinator.session().clone(), redirect(), navigate.clone());

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let coordinator_password = coordinator.clone();
    let navigate_password = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator_password.clone();
            let navigate = navigate_password.clone();
            let redirect = redirect();
            leptos::task::spawn_local(async move {
                let result = coordinator.login(&credentials).await;
                sync_auth_state(auth, coordinator.session(), false);
                match sign_in_destination(&result, redirect.as_deref()) {
                    Ok(path) => navigate(&path, replace_history()),
                    Err(msg) => info.set(msg),
                }
                busy.set(false);
            });
        }
    };

    let on_google = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Waiting for Google...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator.clone();
            let navigate = navigate.clone();
            let redirect = redirect();
            leptos::task::spawn_local(async move {
                let result = coordinator.google_sign_in().await;
                sync_auth_state(auth, coordinator.session(), false);
                match sign_in_destination(&result, redirect.as_deref()) {
                    Ok(path) => navigate(&path, replace_history()),
                    Err(msg) => info.set(msg),
                }
                busy.set(false);
            });
        }
    };

    let google_enabled = config.google_enabled();

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Qring"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                {google_enabled
                    .then(|| {
                        view! {
                            <div class="auth-divider"></div>
                            <button
                                class="auth-button auth-button--google"
                                disabled=move || busy.get()
                                on:click=on_google
                            >
                                "Continue with Google"
                            </button>
                        }
                    })}
                <nav class="auth-links">
                    <a href="/forgot-password">"Forgot password?"</a>
                    <a href="/signup">"Create an account"</a>
                </nav>
            </div>
        </div>
    }
}
