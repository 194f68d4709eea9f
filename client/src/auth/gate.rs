//! Route authorization gate.
//!
//! DESIGN
//! ======
//! Each protected route declares a [`RoutePolicy`]: an ordered list of
//! guards. [`evaluate`] walks the list the same way for every route and stops
//! at the first guard that does not pass:
//!
//! 1. `Authenticated` sends anonymous visitors to `/login`, carrying the
//!    attempted path in `?redirect=`.
//! 2. `Roles` sends users whose role is absent or outside the allowed set to
//!    `/unauthorized`.
//! 3. `Subscription` needs an async billing lookup. Until it resolves the gate
//!    answers `AwaitSubscription` and nothing is shown or navigated. A failed
//!    lookup counts as inactive, which redirects to the paywall with the
//!    destination preserved.
//!
//! Redirect targets are plain paths; the caller navigates with history
//! replacement so Back never lands on the gated page again.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use super::error::AuthError;
use crate::net::types::{Role, SubscriptionStatus, User};
use crate::state::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const PAYWALL_PATH: &str = "/billing/paywall";
pub const REDIRECT_PARAM: &str = "redirect";

pub const HOMEOWNER_LANDING: &str = "/dashboard/homeowner/overview";
pub const ESTATE_LANDING: &str = "/dashboard/estate";
pub const ADMIN_LANDING: &str = "/dashboard/admin";

/// Billing entitlement as known to the gate at evaluation time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Entitlement {
    /// No lookup has been started.
    #[default]
    Unknown,
    /// A lookup is in flight.
    Pending,
    Active,
    Inactive,
}

impl Entitlement {
    /// Collapse a lookup result. Lookup errors deny access.
    pub fn from_lookup(result: &Result<SubscriptionStatus, AuthError>) -> Self {
        match result {
            Ok(status) if status.is_active() => Self::Active,
            Ok(_) => Self::Inactive,
            Err(err) => {
                leptos::logging::warn!("subscription lookup failed, treating as inactive: {err}");
                Self::Inactive
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    /// The subscription guard is waiting on a lookup; render a neutral
    /// loading state and do not navigate.
    AwaitSubscription,
    Redirect(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Pass,
    Fail,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guard {
    Authenticated,
    Roles(Vec<Role>),
    Subscription,
}

/// Inputs a guard may inspect.
#[derive(Clone, Copy, Debug)]
pub struct GateContext<'a> {
    pub session: &'a Session,
    pub path: &'a str,
    pub entitlement: Entitlement,
}

impl Guard {
    pub fn check(&self, ctx: &GateContext<'_>) -> GuardOutcome {
        let passed = match self {
            Self::Authenticated => ctx.session.is_authenticated(),
            Self::Roles(allowed) => ctx.session.role().is_some_and(|role| allowed.contains(&role)),
            Self::Subscription => match ctx.entitlement {
                Entitlement::Active => true,
                Entitlement::Inactive => false,
                Entitlement::Unknown | Entitlement::Pending => return GuardOutcome::Pending,
            },
        };
        if passed { GuardOutcome::Pass } else { GuardOutcome::Fail }
    }

    /// Where a failing guard sends the visitor.
    pub fn redirect(&self, path: &str) -> String {
        match self {
            Self::Authenticated => with_return_path(LOGIN_PATH, path),
            Self::Roles(_) => UNAUTHORIZED_PATH.to_owned(),
            Self::Subscription => with_return_path(PAYWALL_PATH, path),
        }
    }
}

/// Ordered guard chain attached to a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    pub guards: Vec<Guard>,
}

impl RoutePolicy {
    #[must_use]
    pub fn public() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated() -> Self {
        Self { guards: vec![Guard::Authenticated] }
    }

    #[must_use]
    pub fn roles(allowed: &[Role]) -> Self {
        Self { guards: vec![Guard::Authenticated, Guard::Roles(allowed.to_vec())] }
    }

    /// Role-gated and billing-gated.
    #[must_use]
    pub fn billed(allowed: &[Role]) -> Self {
        let mut policy = Self::roles(allowed);
        policy.guards.push(Guard::Subscription);
        policy
    }

    #[must_use]
    pub fn homeowner() -> Self {
        Self::billed(&[Role::Homeowner])
    }

    #[must_use]
    pub fn estate() -> Self {
        Self::billed(&[Role::Estate])
    }

    #[must_use]
    pub fn admin() -> Self {
        Self::roles(&[Role::Admin])
    }

    #[must_use]
    pub fn needs_subscription(&self) -> bool {
        self.guards.contains(&Guard::Subscription)
    }
}

/// Run `policy` against the current session for a navigation to `path`.
pub fn evaluate(policy: &RoutePolicy, session: &Session, path: &str, entitlement: Entitlement) -> GateDecision {
    let ctx = GateContext { session, path, entitlement };
    for guard in &policy.guards {
        match guard.check(&ctx) {
            GuardOutcome::Pass => {}
            GuardOutcome::Pending => return GateDecision::AwaitSubscription,
            GuardOutcome::Fail => return GateDecision::Redirect(guard.redirect(path)),
        }
    }
    GateDecision::Proceed
}

/// Static role-to-dashboard table.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Homeowner => HOMEOWNER_LANDING,
        Role::Estate => ESTATE_LANDING,
        Role::Admin => ADMIN_LANDING,
    }
}

/// Dashboard for a user's raw role string.
///
/// # Errors
///
/// `UnmappedRole` when the user has no role or one without a dashboard.
pub fn landing_for_user(user: &User) -> Result<&'static str, AuthError> {
    let raw = user.role.clone().unwrap_or_default();
    Role::parse(&raw)
        .map(landing_path)
        .ok_or(AuthError::UnmappedRole(if raw.is_empty() { "none".to_owned() } else { raw }))
}

/// Where to go after a successful sign-in: the preserved destination when it
/// is a safe in-app path, otherwise the user's landing dashboard.
///
/// # Errors
///
/// `UnmappedRole` when no redirect applies and the role has no dashboard.
pub fn post_login_destination(redirect: Option<&str>, user: &User) -> Result<String, AuthError> {
    if let Some(path) = redirect.filter(|p| is_safe_return_path(p)) {
        return Ok(path.to_owned());
    }
    landing_for_user(user).map(str::to_owned)
}

/// Only same-origin absolute paths are followed, and never back into the
/// auth pages themselves.
pub fn is_safe_return_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.starts_with(LOGIN_PATH)
}

fn with_return_path(target: &str, path: &str) -> String {
    format!("{target}?{REDIRECT_PARAM}={}", utf8_percent_encode(path, NON_ALPHANUMERIC))
}
