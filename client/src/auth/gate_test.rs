use super::*;

// =============================================================
// Helpers
// =============================================================

fn session_for(role: Option<&str>) -> Session {
    Session {
        access_token: "tok".to_owned(),
        refresh_token: String::new(),
        user: Some(User { id: "u-1".to_owned(), role: role.map(str::to_owned), ..User::default() }),
    }
}

const OVERVIEW: &str = "/dashboard/homeowner/overview";
const LOGIN_WITH_OVERVIEW: &str = "/login?redirect=%2Fdashboard%2Fhomeowner%2Foverview";
const PAYWALL_WITH_OVERVIEW: &str = "/billing/paywall?redirect=%2Fdashboard%2Fhomeowner%2Foverview";

// =============================================================
// Authentication guard
// =============================================================

#[test]
fn anonymous_visit_redirects_to_login_with_return_path() {
    let decision = evaluate(&RoutePolicy::homeowner(), &Session::default(), OVERVIEW, Entitlement::Unknown);
    assert_eq!(decision, GateDecision::Redirect(LOGIN_WITH_OVERVIEW.to_owned()));
}

#[test]
fn token_without_user_is_sent_to_login() {
    let session = Session { access_token: "tok".to_owned(), ..Session::default() };
    let decision = evaluate(&RoutePolicy::authenticated(), &session, "/account/password", Entitlement::Unknown);
    assert!(matches!(decision, GateDecision::Redirect(target) if target.starts_with("/login?redirect=")));
}

#[test]
fn public_policy_always_proceeds() {
    assert_eq!(
        evaluate(&RoutePolicy::public(), &Session::default(), "/", Entitlement::Unknown),
        GateDecision::Proceed
    );
}

// =============================================================
// Role guard
// =============================================================

#[test]
fn wrong_role_redirects_to_unauthorized() {
    let policy = RoutePolicy::roles(&[Role::Estate]);
    let decision = evaluate(&policy, &session_for(Some("homeowner")), "/dashboard/estate", Entitlement::Unknown);
    assert_eq!(decision, GateDecision::Redirect(UNAUTHORIZED_PATH.to_owned()));
}

#[test]
fn missing_role_fails_role_guard() {
    let decision = evaluate(&RoutePolicy::admin(), &session_for(None), "/dashboard/admin", Entitlement::Unknown);
    assert_eq!(decision, GateDecision::Redirect(UNAUTHORIZED_PATH.to_owned()));
}

#[test]
fn unknown_role_fails_role_guard() {
    let decision = evaluate(&RoutePolicy::admin(), &session_for(Some("guard")), "/dashboard/admin", Entitlement::Unknown);
    assert_eq!(decision, GateDecision::Redirect(UNAUTHORIZED_PATH.to_owned()));
}

#[test]
fn admin_route_has_no_subscription_guard() {
    assert!(!RoutePolicy::admin().needs_subscription());
    let decision = evaluate(&RoutePolicy::admin(), &session_for(Some("admin")), "/dashboard/admin", Entitlement::Unknown);
    assert_eq!(decision, GateDecision::Proceed);
}

// =============================================================
// Subscription guard
// =============================================================

#[test]
fn unknown_entitlement_waits_for_lookup() {
    let session = session_for(Some("homeowner"));
    assert_eq!(
        evaluate(&RoutePolicy::homeowner(), &session, OVERVIEW, Entitlement::Unknown),
        GateDecision::AwaitSubscription
    );
    assert_eq!(
        evaluate(&RoutePolicy::homeowner(), &session, OVERVIEW, Entitlement::Pending),
        GateDecision::AwaitSubscription
    );
}

#[test]
fn inactive_subscription_redirects_to_paywall() {
    let status = SubscriptionStatus { status: "inactive".to_owned(), ..SubscriptionStatus::default() };
    let entitlement = Entitlement::from_lookup(&Ok(status));
    let decision = evaluate(&RoutePolicy::homeowner(), &session_for(Some("homeowner")), OVERVIEW, entitlement);
    assert_eq!(decision, GateDecision::Redirect(PAYWALL_WITH_OVERVIEW.to_owned()));
}

#[test]
fn active_subscription_proceeds() {
    let status = SubscriptionStatus { status: "active".to_owned(), ..SubscriptionStatus::default() };
    let entitlement = Entitlement::from_lookup(&Ok(status));
    assert_eq!(entitlement, Entitlement::Active);
    let decision = evaluate(&RoutePolicy::homeowner(), &session_for(Some("homeowner")), OVERVIEW, entitlement);
    assert_eq!(decision, GateDecision::Proceed);
}

#[test]
fn failed_lookup_fails_closed() {
    let entitlement = Entitlement::from_lookup(&Err(AuthError::Network("offline".to_owned())));
    assert_eq!(entitlement, Entitlement::Inactive);
    let decision = evaluate(&RoutePolicy::estate(), &session_for(Some("estate")), "/dashboard/estate", entitlement);
    assert_eq!(
        decision,
        GateDecision::Redirect("/billing/paywall?redirect=%2Fdashboard%2Festate".to_owned())
    );
}

#[test]
fn role_guard_runs_before_subscription_guard() {
    let decision = evaluate(&RoutePolicy::estate(), &session_for(Some("homeowner")), "/dashboard/estate", Entitlement::Active);
    assert_eq!(decision, GateDecision::Redirect(UNAUTHORIZED_PATH.to_owned()));
}

// =============================================================
// Landing and post-login return
// =============================================================

#[test]
fn landing_table_matches_roles() {
    assert_eq!(landing_path(Role::Homeowner), "/dashboard/homeowner/overview");
    assert_eq!(landing_path(Role::Estate), "/dashboard/estate");
    assert_eq!(landing_path(Role::Admin), "/dashboard/admin");
}

#[test]
fn unmapped_role_is_an_error() {
    let user = User { role: Some("guard".to_owned()), ..User::default() };
    assert_eq!(landing_for_user(&user), Err(AuthError::UnmappedRole("guard".to_owned())));
    let user = User::default();
    assert_eq!(landing_for_user(&user), Err(AuthError::UnmappedRole("none".to_owned())));
}

#[test]
fn post_login_returns_to_preserved_path() {
    let user = User { role: Some("homeowner".to_owned()), ..User::default() };
    assert_eq!(post_login_destination(Some(OVERVIEW), &user).unwrap(), OVERVIEW);
}

#[test]
fn post_login_without_redirect_uses_landing() {
    let user = User { role: Some("estate".to_owned()), ..User::default() };
    assert_eq!(post_login_destination(None, &user).unwrap(), ESTATE_LANDING);
}

#[test]
fn post_login_ignores_offsite_redirects() {
    let user = User { role: Some("admin".to_owned()), ..User::default() };
    for bad in ["https://evil.test", "//evil.test", "/\\evil.test", "/login?redirect=%2F", "dashboard"] {
        assert_eq!(post_login_destination(Some(bad), &user).unwrap(), ADMIN_LANDING, "{bad}");
    }
}

#[test]
fn post_login_unmapped_role_without_redirect_errors() {
    let user = User { role: Some("guard".to_owned()), ..User::default() };
    assert!(post_login_destination(None, &user).is_err());
}

// =============================================================
// Full round trip through login
// =============================================================

#[test]
fn anonymous_visit_then_login_lands_back_on_requested_page() {
    use crate::net::api::paths;
    use crate::net::types::Credentials;
    use crate::testing::{FakeApi, coordinator, make_token};

    let policy = RoutePolicy::homeowner();
    let GateDecision::Redirect(target) = evaluate(&policy, &Session::default(), OVERVIEW, Entitlement::Unknown) else {
        panic!("expected redirect");
    };
    let encoded = target.strip_prefix("/login?redirect=").unwrap();
    let preserved = percent_encoding::percent_decode_str(encoded).decode_utf8().unwrap();
    assert_eq!(preserved, OVERVIEW);

    let body = serde_json::json!({
        "data": {
            "accessToken": make_token(&serde_json::json!({"role": "homeowner"})),
            "user": {"id": "u-1"}
        }
    });
    let auth = coordinator(FakeApi::new().respond(paths::LOGIN, Ok(body)));
    let creds = Credentials { email: "ada@example.com".to_owned(), password: "hunter22".to_owned() };
    let session = futures::executor::block_on(auth.login(&creds)).unwrap();

    let destination = post_login_destination(Some(preserved.as_ref()), session.user.as_ref().unwrap()).unwrap();
    assert_eq!(destination, OVERVIEW);
    assert_eq!(evaluate(&policy, &session, &destination, Entitlement::Active), GateDecision::Proceed);
}
