//! Paywall and Paystack return page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The subscription guard sends inactive homeowner/estate accounts to
//! `/billing/paywall?redirect=<path>`. Checkout happens off-site; Paystack
//! returns to `/billing/callback?reference=...` where the transaction is
//! verified and the user continues to the preserved destination. Both pages
//! only require a session: they must stay reachable without a subscription.

#[cfg(test)]
#[path = "paywall_test.rs"]
mod paywall_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::auth::AppAuth;
use crate::auth::gate::{PAYWALL_PATH, REDIRECT_PARAM, RoutePolicy, is_safe_return_path, landing_for_user};
use crate::components::protected_route::Protected;
use crate::config::ClientConfig;
use crate::net::types::User;
use crate::state::auth::AuthState;
use crate::util::auth::replace_history;

/// Where to continue once billing is settled: the preserved destination when
/// it is a safe local path, else the user's dashboard, else `/`.
pub fn billing_return_path(redirect: Option<&str>, user: Option<&User>) -> String {
    if let Some(path) = redirect.filter(|p| is_safe_return_path(p) && !p.starts_with("/billing")) {
        return path.to_owned();
    }
    user.and_then(|u| landing_for_user(u).ok()).unwrap_or("/").to_owned()
}

/// Paystack appends both `reference` and `trxref`; either identifies the
/// transaction.
pub fn callback_reference(reference: Option<String>, trxref: Option<String>) -> Option<String> {
    [reference, trxref]
        .into_iter()
        .flatten()
        .map(|r| r.trim().to_owned())
        .find(|r| !r.is_empty())
}

#[component]
pub fn PaywallPage() -> impl IntoView {
    view! {
        <Protected policy=RoutePolicy::authenticated()>
            <Paywall/>
        </Protected>
    }
}

#[component]
fn Paywall() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let query = use_query_map();
    let navigate = use_navigate();

    let checkout = config.checkout_link().map(str::to_owned);
    let destination = move || {
        let redirect = query.with(|q| q.get(REDIRECT_PARAM));
        billing_return_path(redirect.as_deref(), auth.get().user.as_ref())
    };

    let on_continue = move |_| navigate(&destination(), replace_history());

    view! {
        <div class="auth-page">
            <div class="auth-card paywall">
                <h1>"Subscription required"</h1>
                <p class="auth-card__subtitle">
                    "Your Qring plan is not active. Complete payment to unlock your dashboard."
                </p>
                <p class="paywall__destination">"You'll return to " <code>{destination}</code></p>
                {checkout.map(|href| view! {
                    <a class="auth-button" href=href target="_blank" rel="noopener noreferrer">
                        "Subscribe"
                    </a>
                })}
                <button class="auth-button" on:click=on_continue>
                    "I've paid, continue"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn PaymentCallbackPage() -> impl IntoView {
    view! {
        <Protected policy=RoutePolicy::authenticated()>
            <PaymentCallback/>
        </Protected>
    }
}

#[component]
fn PaymentCallback() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();
    let query = use_query_map();
    let navigate = use_navigate();

    let info = RwSignal::new("Confirming your payment...".to_owned());
    let failed = RwSignal::new(false);

    let reference = query.with_untracked(|q| callback_reference(q.get("reference"), q.get("trxref")));
    let redirect = query.with_untracked(|q| q.get(REDIRECT_PARAM));
    let destination = billing_return_path(redirect.as_deref(), auth.get_untracked().user.as_ref());

    match reference {
        None => {
            info.set("Missing payment reference.".to_owned());
            failed.set(true);
        }
        Some(reference) => {
            #[cfg(feature = "hydrate")]
            {
                let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
                let alive_task = alive.clone();
                let destination = destination.clone();
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    let result = coordinator.verify_payment(&reference).await;
                    if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                        return;
                    }
                    match result {
                        Ok(outcome) if outcome.verified => navigate(&destination, replace_history()),
                        Ok(outcome) => {
                            info.set(outcome.message.unwrap_or_else(|| "Payment was not confirmed.".to_owned()));
                            failed.set(true);
                        }
                        Err(e) => {
                            info.set(e.to_string());
                            failed.set(true);
                        }
                    }
                });
                on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (reference, &coordinator);
        }
    }

    let paywall_href = format!("{PAYWALL_PATH}?{REDIRECT_PARAM}={}", utf8_percent_encode(&destination, NON_ALPHANUMERIC));
    let on_retry = move |_| navigate(&paywall_href, replace_history());

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Payment"</h1>
                <p class="auth-message">{move || info.get()}</p>
                <button class="auth-button" hidden=move || !failed.get() on:click=on_retry>
                    "Back to billing"
                </button>
            </div>
        </div>
    }
}
