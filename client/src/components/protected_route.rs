//! Route wrapper that enforces a [`RoutePolicy`] before rendering children.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every gated route in `app` renders through `Protected`. The decision itself
//! is the pure `auth::gate::evaluate`; this component only feeds it reactive
//! inputs (auth view, location, entitlement) and acts on the answer.
//!
//! DESIGN
//! ======
//! The subscription lookup is started at most once per mount. Its result is
//! applied only while the component is still mounted, tracked with the same
//! liveness flag the dashboards use for their background tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::auth::AppAuth;
use crate::auth::gate::{Entitlement, GateDecision, RoutePolicy, evaluate};
use crate::state::auth::AuthState;
use crate::util::auth::replace_history;

#[component]
pub fn Protected(policy: RoutePolicy, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let coordinator = expect_context::<AppAuth>();
    let location = use_location();
    let navigate = use_navigate();
    let entitlement = RwSignal::new(Entitlement::Unknown);

    let alive = Arc::new(AtomicBool::new(true));
    let alive_cleanup = Arc::clone(&alive);
    on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

    let session = coordinator.session().clone();
    let decision = Memo::new(move |_| {
        // The store is not reactive; the auth view changes whenever it does.
        // Until the browser has loaded the stored session nothing is decided.
        if auth.with(|a| a.loading) {
            return None;
        }
        let path = location.pathname.get();
        let search = location.search.get();
        let search = search.trim_start_matches('?');
        let full_path = if search.is_empty() { path } else { format!("{path}?{search}") };
        Some(evaluate(&policy, &session.get(), &full_path, entitlement.get()))
    });

    Effect::new(move || match decision.get() {
        None | Some(GateDecision::Proceed) => {}
        Some(GateDecision::Redirect(target)) => navigate(&target, replace_history()),
        Some(GateDecision::AwaitSubscription) => {
            if entitlement.get_untracked() != Entitlement::Unknown {
                return;
            }
            entitlement.set(Entitlement::Pending);

            #[cfg(feature = "hydrate")]
            {
                let coordinator = coordinator.clone();
                let alive = Arc::clone(&alive);
                leptos::task::spawn_local(async move {
                    let result = coordinator.subscription_status().await;
                    if alive.load(Ordering::Relaxed) {
                        entitlement.set(Entitlement::from_lookup(&result));
                    }
                });
            }
        }
    });

    view! {
        {move || match decision.get() {
            Some(GateDecision::Proceed) => children().into_any(),
            _ => view! { <div class="route-gate route-gate--pending" aria-busy="true"></div> }.into_any(),
        }}
    }
}
