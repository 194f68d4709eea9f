//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::auth::AppAuth;
use crate::config::ClientConfig;
use crate::net::api::{GoogleIdentity, HttpApi};
use crate::pages::change_password::ChangePasswordPage;
use crate::pages::dashboard::{AdminDashboardPage, EstateDashboardPage, HomeownerOverviewPage};
use crate::pages::forgot_password::ForgotPasswordPage;
use crate::pages::google_role::GoogleRolePage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::paywall::{PaymentCallbackPage, PaywallPage};
use crate::pages::reset_password::ResetPasswordPage;
use crate::pages::signup::{AdminSignupPage, SignupPage};
use crate::pages::unauthorized::UnauthorizedPage;
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::auth::sync_auth_state;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the config, coordinator and auth-view contexts and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let coordinator: AppAuth = AppAuth::new(
        HttpApi::new(config.clone()),
        GoogleIdentity::new(&config),
        SessionStore::browser(),
    );

    // The server has no stored session, so the first render is always
    // "loading". The browser flips it once storage has been read.
    let auth = RwSignal::new(AuthState { loading: true, ..AuthState::default() });
    let session = coordinator.session().clone();
    Effect::new(move || sync_auth_state(auth, &session, false));

    provide_context(config);
    provide_context(coordinator);
    provide_context(auth);

    view! {
        <Stylesheet id="leptos" href="/pkg/qring.css"/>
        <Title text="Qring"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=(StaticSegment("signup"), StaticSegment("google")) view=GoogleRolePage/>
                <Route path=(StaticSegment("admin"), StaticSegment("signup")) view=AdminSignupPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                <Route path=StaticSegment("unauthorized") view=UnauthorizedPage/>
                <Route path=(StaticSegment("account"), StaticSegment("password")) view=ChangePasswordPage/>
                <Route path=(StaticSegment("billing"), StaticSegment("paywall")) view=PaywallPage/>
                <Route path=(StaticSegment("billing"), StaticSegment("callback")) view=PaymentCallbackPage/>
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("homeowner"), StaticSegment("overview"))
                    view=HomeownerOverviewPage
                />
                <Route path=(StaticSegment("dashboard"), StaticSegment("estate")) view=EstateDashboardPage/>
                <Route path=(StaticSegment("dashboard"), StaticSegment("admin")) view=AdminDashboardPage/>
            </Routes>
        </Router>
    }
}
