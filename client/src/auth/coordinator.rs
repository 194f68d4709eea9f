//! Auth coordinator: login, signup, OAuth, password flows, logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Forms call into the coordinator; the coordinator calls the backend through
//! `QringApi`, normalizes the answer with `net::envelope`, and commits the
//! result to the `SessionStore`. The route gate only ever reads the store.
//!
//! DESIGN
//! ======
//! - One shared `loading` flag, raised for the duration of each
//!   network-backed call and lowered by a drop guard on every exit path.
//!   Overlapping calls share it, so whichever finishes last lowers it last.
//!   It is read through `is_loading`; pages keep their own `busy` signal for
//!   buttons, and `AuthState.loading` only means the session is not loaded yet.
//! - A session is committed only when both an access token and a user came
//!   back. Failures leave the store untouched.
//! - Logout clears the local session from a drop guard, so neither a failed
//!   revoke call nor a dropped future can leave the user signed in.
//! - No retries. Errors surface once, as a single line.

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use super::error::AuthError;
use crate::net::api::{IdentityProvider, QringApi};
use crate::net::envelope::{AuthPayload, backend_message, innermost_payload, normalize_auth_response};
use crate::net::types::{
    ChangePasswordRequest, Credentials, GoogleAuthRequest, ResetPasswordRequest, Role, SignupFields,
    SubscriptionStatus,
};
use crate::state::session::{Session, SessionPatch, SessionStore};

const FORGOT_PASSWORD_SENT: &str = "If that email is registered, a reset code is on its way.";
const PASSWORD_RESET_DONE: &str = "Password reset. You can sign in with your new password.";
const PASSWORD_CHANGED: &str = "Password changed.";

/// Outcome of verifying a Paystack transaction reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentVerification {
    pub verified: bool,
    pub message: Option<String>,
}

pub struct AuthCoordinator<A, P> {
    api: A,
    identity: P,
    session: SessionStore,
    loading: Arc<AtomicBool>,
}

impl<A: Clone, P: Clone> Clone for AuthCoordinator<A, P> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            identity: self.identity.clone(),
            session: self.session.clone(),
            loading: Arc::clone(&self.loading),
        }
    }
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Relaxed);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

struct ClearSessionOnDrop<'a>(&'a SessionStore);

impl Drop for ClearSessionOnDrop<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

impl<A: QringApi, P: IdentityProvider> AuthCoordinator<A, P> {
    pub fn new(api: A, identity: P, session: SessionStore) -> Self {
        Self { api, identity, session, loading: Arc::new(AtomicBool::new(false)) }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    /// Shared handle to the loading flag, so a scripted backend can sample it
    /// mid-call.
    #[cfg(test)]
    pub(crate) fn loading_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.loading)
    }

    /// Email + password login.
    ///
    /// # Errors
    ///
    /// Validation, network and backend errors, or `MissingToken` when the
    /// response lacks a token or user.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthError::validation("Enter your email and password."));
        }
        let _loading = LoadingGuard::raise(&self.loading);
        let body = self.api.login(credentials).await?;
        self.commit(normalize_auth_response(&body))
    }

    /// Create an account. Returns `Some(session)` when the backend signs the
    /// user straight in, `None` when it only created the account.
    ///
    /// # Errors
    ///
    /// Network and backend errors.
    pub async fn signup(&self, fields: &SignupFields) -> Result<Option<Session>, AuthError> {
        let _loading = LoadingGuard::raise(&self.loading);
        let body = self.api.signup(fields).await?;
        self.commit_if_complete(normalize_auth_response(&body))
    }

    /// Create an admin account through the dedicated endpoint.
    ///
    /// # Errors
    ///
    /// Network and backend errors.
    pub async fn admin_signup(&self, fields: &SignupFields) -> Result<Option<Session>, AuthError> {
        let _loading = LoadingGuard::raise(&self.loading);
        let body = self.api.admin_signup(fields).await?;
        self.commit_if_complete(normalize_auth_response(&body))
    }

    /// Sign in with an existing Google-linked account.
    ///
    /// # Errors
    ///
    /// Identity popup failures, network and backend errors, `MissingToken`.
    pub async fn google_sign_in(&self) -> Result<Session, AuthError> {
        let _loading = LoadingGuard::raise(&self.loading);
        let credential = self.identity.google_credential().await?;
        let body = self.api.google_auth(&GoogleAuthRequest { credential, role: None }).await?;
        self.commit(normalize_auth_response(&body))
    }

    /// Register through Google with the role picked on the role-selection page.
    ///
    /// When the backend returns a user without any role, the requested role is
    /// stamped on locally. The backend stays authoritative for every request it
    /// serves; the stamp only decides which dashboard the client opens.
    ///
    /// # Errors
    ///
    /// Identity popup failures, network and backend errors, `MissingToken`.
    pub async fn google_sign_up(&self, role: Role) -> Result<Session, AuthError> {
        let _loading = LoadingGuard::raise(&self.loading);
        let credential = self.identity.google_credential().await?;
        let body = self
            .api
            .google_auth(&GoogleAuthRequest { credential, role: Some(role) })
            .await?;
        let mut payload = normalize_auth_response(&body);
        if let Some(user) = payload.user.as_mut() {
            if user.role.is_none() {
                leptos::logging::warn!(
                    "google sign-up: backend returned user {} without a role; using requested role {role}",
                    user.id
                );
                user.role = Some(role.as_str().to_owned());
            }
        }
        self.commit(payload)
    }

    /// Ask the backend to send a password-reset OTP.
    ///
    /// # Errors
    ///
    /// Validation, network and backend errors.
    pub async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::validation("Enter your email."));
        }
        let _loading = LoadingGuard::raise(&self.loading);
        let body = self.api.forgot_password(email).await?;
        Ok(backend_message(&body).unwrap_or_else(|| FORGOT_PASSWORD_SENT.to_owned()))
    }

    /// Set a new password using the emailed OTP.
    ///
    /// # Errors
    ///
    /// Network and backend errors.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<String, AuthError> {
        let _loading = LoadingGuard::raise(&self.loading);
        let body = self.api.reset_password(request).await?;
        Ok(backend_message(&body).unwrap_or_else(|| PASSWORD_RESET_DONE.to_owned()))
    }

    /// Change the signed-in user's password.
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without a session, otherwise network and backend errors.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<String, AuthError> {
        let access_token = self.access_token()?;
        let _loading = LoadingGuard::raise(&self.loading);
        let body = self.api.change_password(&access_token, request).await?;
        Ok(backend_message(&body).unwrap_or_else(|| PASSWORD_CHANGED.to_owned()))
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// A 401 from the refresh endpoint means the session is dead, so it is
    /// cleared before the error is returned.
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without a refresh token, `MissingToken`, network and
    /// backend errors.
    pub async fn refresh_session(&self) -> Result<Session, AuthError> {
        let refresh_token = self.session.get().refresh_token;
        if refresh_token.is_empty() {
            return Err(AuthError::NotSignedIn);
        }
        let _loading = LoadingGuard::raise(&self.loading);
        let body = match self.api.refresh_token(&refresh_token).await {
            Ok(body) => body,
            Err(err) => {
                if err.is_unauthorized() {
                    self.session.clear();
                }
                return Err(err);
            }
        };
        let payload = normalize_auth_response(&body);
        let access_token = payload.access_token.ok_or(AuthError::MissingToken)?;
        self.session.set(SessionPatch {
            access_token: Some(access_token),
            refresh_token: payload.refresh_token,
            user: payload.user,
        });
        Ok(self.session.get())
    }

    /// Look up the signed-in user's subscription.
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without a session, otherwise network and backend errors.
    pub async fn subscription_status(&self) -> Result<SubscriptionStatus, AuthError> {
        let access_token = self.access_token()?;
        let body = self.api.subscription(&access_token).await?;
        let payload = innermost_payload(&body);
        let payload = payload.get("subscription").cloned().unwrap_or(payload);
        Ok(serde_json::from_value(payload).unwrap_or_default())
    }

    /// Confirm a Paystack transaction after the checkout redirect.
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without a session, otherwise network and backend errors.
    pub async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, AuthError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(AuthError::validation("Missing payment reference."));
        }
        let access_token = self.access_token()?;
        let _loading = LoadingGuard::raise(&self.loading);
        let body = self.api.verify_payment(&access_token, reference).await?;
        Ok(PaymentVerification { verified: payment_succeeded(&body), message: backend_message(&body) })
    }

    /// Best-effort server revoke, then unconditional local sign-out.
    pub async fn logout(&self) {
        let _loading = LoadingGuard::raise(&self.loading);
        let _clear = ClearSessionOnDrop(&self.session);
        let refresh_token = self.session.get().refresh_token;
        if refresh_token.is_empty() {
            return;
        }
        if let Err(err) = self.api.logout(&refresh_token).await {
            leptos::logging::warn!("logout: refresh token revoke failed: {err}");
        }
    }

    fn access_token(&self) -> Result<String, AuthError> {
        let session = self.session.get();
        if session.is_authenticated() {
            Ok(session.access_token)
        } else {
            Err(AuthError::NotSignedIn)
        }
    }

    fn commit(&self, payload: AuthPayload) -> Result<Session, AuthError> {
        let AuthPayload { access_token: Some(access_token), refresh_token, user: Some(user) } = payload else {
            return Err(AuthError::MissingToken);
        };
        self.session.set(SessionPatch {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token.unwrap_or_default()),
            user: Some(user),
        });
        Ok(self.session.get())
    }

    fn commit_if_complete(&self, payload: AuthPayload) -> Result<Option<Session>, AuthError> {
        if payload.is_complete() {
            self.commit(payload).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Paystack reports success as `status: "success"` on the transaction, which
/// the backend may wrap; a bare `verified: true` is accepted as well.
fn payment_succeeded(body: &Value) -> bool {
    let mut level = Some(body);
    for _ in 0..=crate::net::envelope::MAX_ENVELOPE_DEPTH {
        let Some(current) = level else {
            break;
        };
        let status_success = current
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|s| s.eq_ignore_ascii_case("success"));
        let verified = current.get("verified").and_then(Value::as_bool) == Some(true);
        if status_success || verified {
            return true;
        }
        level = current.get("data");
    }
    false
}
