//! Test doubles shared by unit tests across modules.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::auth::coordinator::AuthCoordinator;
use crate::auth::error::AuthError;
use crate::net::api::{IdentityProvider, QringApi, paths};
use crate::net::types::{
    ChangePasswordRequest, Credentials, GoogleAuthRequest, ResetPasswordRequest, SignupFields,
};
use crate::state::session::SessionStore;

/// Build an unsigned JWT-shaped token with the given payload.
pub fn make_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
    format!("{header}.{body}.sig")
}

/// Scripted backend keyed by endpoint path.
#[derive(Default)]
pub struct FakeApi {
    responses: RefCell<HashMap<String, Result<Value, AuthError>>>,
    calls: RefCell<Vec<(String, Value)>>,
    loading_seen: RefCell<Vec<bool>>,
    watch: RefCell<Option<Arc<AtomicBool>>>,
    stall_logout: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, result: Result<Value, AuthError>) -> Self {
        self.responses.borrow_mut().insert(path.to_owned(), result);
        self
    }

    /// Make `logout` hang forever, to exercise cancellation.
    pub fn stalling_logout(mut self) -> Self {
        self.stall_logout = true;
        self
    }

    /// Record the coordinator's loading flag at each call.
    pub fn watch_loading(&self, flag: Arc<AtomicBool>) {
        *self.watch.borrow_mut() = Some(flag);
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.loading_seen.borrow().clone()
    }

    pub fn called_paths(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(path, _)| path.clone()).collect()
    }

    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
    }

    fn answer(&self, path: &str, body: Value) -> Result<Value, AuthError> {
        if let Some(flag) = self.watch.borrow().as_ref() {
            self.loading_seen.borrow_mut().push(flag.load(Ordering::Relaxed));
        }
        self.calls.borrow_mut().push((path.to_owned(), body));
        self.responses
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(AuthError::Network(format!("no scripted response for {path}"))))
    }
}

impl QringApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<Value, AuthError> {
        self.answer(paths::LOGIN, serde_json::to_value(credentials).unwrap())
    }

    async fn signup(&self, fields: &SignupFields) -> Result<Value, AuthError> {
        self.answer(paths::SIGNUP, serde_json::to_value(fields).unwrap())
    }

    async fn admin_signup(&self, fields: &SignupFields) -> Result<Value, AuthError> {
        self.answer(paths::ADMIN_SIGNUP, serde_json::to_value(fields).unwrap())
    }

    async fn google_auth(&self, request: &GoogleAuthRequest) -> Result<Value, AuthError> {
        self.answer(paths::GOOGLE, serde_json::to_value(request).unwrap())
    }

    async fn forgot_password(&self, email: &str) -> Result<Value, AuthError> {
        self.answer(paths::FORGOT_PASSWORD, serde_json::json!({ "email": email }))
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Value, AuthError> {
        self.answer(paths::RESET_PASSWORD, serde_json::to_value(request).unwrap())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<Value, AuthError> {
        self.answer(paths::REFRESH_TOKEN, serde_json::json!({ "refreshToken": refresh_token }))
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let result = self.answer(paths::LOGOUT, serde_json::json!({ "refreshToken": refresh_token }));
        if self.stall_logout {
            futures::future::pending::<()>().await;
        }
        result.map(|_| ())
    }

    async fn change_password(&self, access_token: &str, request: &ChangePasswordRequest) -> Result<Value, AuthError> {
        let mut body = serde_json::to_value(request).unwrap();
        body["bearer"] = Value::String(access_token.to_owned());
        self.answer(paths::CHANGE_PASSWORD, body)
    }

    async fn subscription(&self, access_token: &str) -> Result<Value, AuthError> {
        self.answer(paths::SUBSCRIPTION, serde_json::json!({ "bearer": access_token }))
    }

    async fn verify_payment(&self, access_token: &str, reference: &str) -> Result<Value, AuthError> {
        self.answer(
            paths::PAYSTACK_VERIFY,
            serde_json::json!({ "bearer": access_token, "reference": reference }),
        )
    }
}

/// Identity provider returning a fixed credential or error.
pub struct FakeIdentity(pub Result<String, AuthError>);

impl FakeIdentity {
    pub fn ok() -> Self {
        Self(Ok("google-id-token".to_owned()))
    }
}

impl IdentityProvider for FakeIdentity {
    async fn google_credential(&self) -> Result<String, AuthError> {
        self.0.clone()
    }
}

pub type TestCoordinator = AuthCoordinator<FakeApi, FakeIdentity>;

/// Coordinator over a fresh in-memory session.
pub fn coordinator(api: FakeApi) -> TestCoordinator {
    coordinator_with(api, FakeIdentity::ok(), SessionStore::in_memory())
}

pub fn coordinator_with(api: FakeApi, identity: FakeIdentity, session: SessionStore) -> TestCoordinator {
    let coordinator = AuthCoordinator::new(api, identity, session);
    coordinator.api().watch_loading(coordinator.loading_flag());
    coordinator
}
