//! Account creation for homeowners and estate managers, plus the admin
//! variant posted to the dedicated endpoint.
//!
//! When the backend signs the new user straight in, the page continues to the
//! role's dashboard. Otherwise the account is pending verification and the
//! user is sent to `/login`.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::form_rules::{check_new_password, require_email};
use crate::auth::AppAuth;
use crate::net::types::{Role, SignupFields};
use crate::state::auth::AuthState;
#[cfg(feature = "hydrate")]
use crate::util::auth::{replace_history, sign_in_destination, sync_auth_state};

/// Raw form input before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm: String,
    pub role: String,
}

/// Validate the draft into the request body.
///
/// # Errors
///
/// The first failing rule's form message.
pub fn validate_signup_input(draft: &SignupDraft) -> Result<SignupFields, &'static str> {
    let first_name = draft.first_name.trim();
    let last_name = draft.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err("Enter your first and last name.");
    }
    let email = require_email(&draft.email)?;
    let phone = draft.phone.trim();
    if phone.is_empty() {
        return Err("Enter your phone number.");
    }
    check_new_password(&draft.password, &draft.confirm)?;
    let role = Role::parse(&draft.role).ok_or("Choose an account type.")?;
    Ok(SignupFields {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email,
        phone: phone.to_owned(),
        password: draft.password.clone(),
        role,
    })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    view! { <SignupForm admin=false/> }
}

#[component]
pub fn AdminSignupPage() -> impl IntoView {
    view! { <SignupForm admin=true/> }
}

#[component]
fn SignupForm(admin: bool) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();
    let navigate = use_navigate();

    let draft = RwSignal::new(SignupDraft {
        role: if admin { Role::Admin.as_str() } else { Role::Homeowner.as_str() }.to_owned(),
        ..SignupDraft::default()
    });
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let fields = match validate_signup_input(&draft.get()) {
            Ok(fields) => fields,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let coordinator = coordinator.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = if admin {
                    coordinator.admin_signup(&fields).await
                } else {
                    coordinator.signup(&fields).await
                };
                sync_auth_state(auth, coordinator.session(), false);
                match result {
                    Ok(Some(session)) => match sign_in_destination(&Ok(session), None) {
                        Ok(path) => navigate(&path, replace_history()),
                        Err(msg) => info.set(msg),
                    },
                    Ok(None) => navigate("/login", replace_history()),
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&SignupDraft) -> String, set: fn(&mut SignupDraft, String)| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=label
                prop:value=move || draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>{if admin { "Create admin account" } else { "Create your Qring account" }}</h1>
                <form class="auth-form" on:submit=on_submit>
                    {field("First name", "text", |d| d.first_name.clone(), |d, v| d.first_name = v)}
                    {field("Last name", "text", |d| d.last_name.clone(), |d, v| d.last_name = v)}
                    {field("Email", "email", |d| d.email.clone(), |d, v| d.email = v)}
                    {field("Phone", "tel", |d| d.phone.clone(), |d, v| d.phone = v)}
                    {field("Password", "password", |d| d.password.clone(), |d, v| d.password = v)}
                    {field("Confirm password", "password", |d| d.confirm.clone(), |d, v| d.confirm = v)}
                    {(!admin)
                        .then(|| {
                            view! {
                                <select
                                    class="auth-input"
                                    prop:value=move || draft.with(|d| d.role.clone())
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        draft.update(|d| d.role = value);
                                    }
                                >
                                    <option value="homeowner">"Homeowner"</option>
                                    <option value="estate">"Estate manager"</option>
                                </select>
                            }
                        })}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Sign Up"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <nav class="auth-links">
                    <a href="/login">"Already have an account? Sign in"</a>
                    {(!admin).then(|| view! { <a href="/signup/google">"Sign up with Google"</a> })}
                </nav>
            </div>
        </div>
    }
}
