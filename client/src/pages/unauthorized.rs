//! Terminal page for signed-in users whose role does not cover the route.

use leptos::prelude::*;

use crate::auth::gate::landing_for_user;
use crate::state::auth::AuthState;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    // An unmapped role has no dashboard to return to; say so instead of
    // guessing one.
    let home = move || auth.get().user.map(|user| landing_for_user(&user));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Access denied"</h1>
                <p class="auth-card__subtitle">"Your account does not have access to that page."</p>
                {move || match home() {
                    Some(Ok(path)) => view! { <a class="auth-button" href=path>"Go to my dashboard"</a> }.into_any(),
                    Some(Err(err)) => view! { <p class="auth-message">{err.to_string()}</p> }.into_any(),
                    None => view! { <a class="auth-button" href="/login">"Sign in"</a> }.into_any(),
                }}
            </div>
        </div>
    }
}
