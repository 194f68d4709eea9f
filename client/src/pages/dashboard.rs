//! Role landing dashboards.
//!
//! SYSTEM CONTEXT
//! ==============
//! These are the landing routes from the role table in `auth::gate`. Each one
//! renders behind its own route policy; device, visitor and estate CRUD views
//! are served by the backend-driven screens and are not part of this slice.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::auth::gate::RoutePolicy;
use crate::components::account_header::AccountHeader;
use crate::components::protected_route::Protected;
use crate::net::types::{Role, User};
use crate::state::auth::AuthState;

/// Heading line for a dashboard.
pub fn greeting(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome, {}", user.display_name()),
        None => "Welcome".to_owned(),
    }
}

/// Short description of what the role's dashboard manages.
pub fn role_summary(role: Role) -> &'static str {
    match role {
        Role::Homeowner => "See who is at your door and manage visitor access.",
        Role::Estate => "Manage residents, gates and estate-wide access.",
        Role::Admin => "Oversee estates, homeowners and subscriptions.",
    }
}

#[component]
pub fn HomeownerOverviewPage() -> impl IntoView {
    view! {
        <Protected policy=RoutePolicy::homeowner()>
            <DashboardView role=Role::Homeowner title="Home overview"/>
        </Protected>
    }
}

#[component]
pub fn EstateDashboardPage() -> impl IntoView {
    view! {
        <Protected policy=RoutePolicy::estate()>
            <DashboardView role=Role::Estate title="Estate dashboard"/>
        </Protected>
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <Protected policy=RoutePolicy::admin()>
            <DashboardView role=Role::Admin title="Admin dashboard"/>
        </Protected>
    }
}

#[component]
fn DashboardView(role: Role, title: &'static str) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    // Admins do not receive doorbell rings.
    let sound_toggle = role != Role::Admin;

    view! {
        <div class="dashboard-page">
            <AccountHeader title=title sound_toggle=sound_toggle/>
            <main class="dashboard-page__body">
                <h2>{move || greeting(auth.get().user.as_ref())}</h2>
                <p class="dashboard-page__summary">{role_summary(role)}</p>
            </main>
        </div>
    }
}
