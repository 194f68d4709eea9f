//! REST API bindings for the external Qring backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call fails with
//! `AuthError::Unavailable`, since these endpoints are only meaningful in the
//! browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! `QringApi` is the seam the auth coordinator is written against. It hands
//! back raw JSON bodies; envelope unwrapping happens in `net::envelope`, not
//! here. `IdentityProvider` is the matching seam for the Google Identity popup.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx answers become `AuthError::Rejected` carrying the backend's own
//! message when it sent one, so forms can show it verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use super::types::{
    ChangePasswordRequest, Credentials, GoogleAuthRequest, ResetPasswordRequest, SignupFields,
};
use crate::auth::error::AuthError;
use crate::config::ClientConfig;

pub mod paths {
    pub const LOGIN: &str = "/auth/login";
    pub const SIGNUP: &str = "/auth/signup";
    pub const ADMIN_SIGNUP: &str = "/auth/admin-signup";
    pub const GOOGLE: &str = "/auth/google";
    pub const FORGOT_PASSWORD: &str = "/auth/forgot-password";
    pub const RESET_PASSWORD: &str = "/auth/reset-password";
    pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
    pub const LOGOUT: &str = "/auth/logout";
    pub const CHANGE_PASSWORD: &str = "/auth/change-password";
    pub const SUBSCRIPTION: &str = "/payment/subscription/me";
    pub const PAYSTACK_VERIFY: &str = "/payment/paystack/verify";
}

/// Backend endpoints consumed by the auth coordinator and route gate.
#[allow(async_fn_in_trait)]
pub trait QringApi {
    async fn login(&self, credentials: &Credentials) -> Result<Value, AuthError>;
    async fn signup(&self, fields: &SignupFields) -> Result<Value, AuthError>;
    async fn admin_signup(&self, fields: &SignupFields) -> Result<Value, AuthError>;
    async fn google_auth(&self, request: &GoogleAuthRequest) -> Result<Value, AuthError>;
    async fn forgot_password(&self, email: &str) -> Result<Value, AuthError>;
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Value, AuthError>;
    async fn refresh_token(&self, refresh_token: &str) -> Result<Value, AuthError>;
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;
    async fn change_password(&self, access_token: &str, request: &ChangePasswordRequest) -> Result<Value, AuthError>;
    async fn subscription(&self, access_token: &str) -> Result<Value, AuthError>;
    async fn verify_payment(&self, access_token: &str, reference: &str) -> Result<Value, AuthError>;
}

/// Source of Google ID tokens.
#[allow(async_fn_in_trait)]
pub trait IdentityProvider {
    async fn google_credential(&self) -> Result<String, AuthError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

/// `gloo-net` implementation of [`QringApi`].
#[derive(Clone, Debug)]
pub struct HttpApi {
    config: ClientConfig,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>, bearer: Option<&str>) -> Result<Value, AuthError> {
        let url = self.config.endpoint(path);
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
            };
            if let Some(token) = bearer {
                builder = builder.header("Authorization", &bearer_header(token));
            }
            let resp = match body {
                Some(body) => builder
                    .json(&body)
                    .map_err(|e| AuthError::Network(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            }
            .map_err(|e| AuthError::Network(e.to_string()))?;

            let status = resp.status();
            let ok = resp.ok();
            let text = resp.text().await.unwrap_or_default();
            if !ok {
                leptos::logging::warn!("api {method:?} {path} failed: status={status}");
            }
            interpret_response(status, ok, &text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, method, body, bearer);
            Err(AuthError::Unavailable)
        }
    }

    async fn post<B: serde::Serialize>(&self, path: &str, body: &B, bearer: Option<&str>) -> Result<Value, AuthError> {
        let body = serde_json::to_value(body).map_err(|e| AuthError::Network(e.to_string()))?;
        self.send(Method::Post, path, Some(body), bearer).await
    }
}

impl QringApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<Value, AuthError> {
        self.post(paths::LOGIN, credentials, None).await
    }

    async fn signup(&self, fields: &SignupFields) -> Result<Value, AuthError> {
        self.post(paths::SIGNUP, fields, None).await
    }

    async fn admin_signup(&self, fields: &SignupFields) -> Result<Value, AuthError> {
        self.post(paths::ADMIN_SIGNUP, fields, None).await
    }

    async fn google_auth(&self, request: &GoogleAuthRequest) -> Result<Value, AuthError> {
        self.post(paths::GOOGLE, request, None).await
    }

    async fn forgot_password(&self, email: &str) -> Result<Value, AuthError> {
        self.post(paths::FORGOT_PASSWORD, &serde_json::json!({ "email": email }), None)
            .await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Value, AuthError> {
        self.post(paths::RESET_PASSWORD, request, None).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<Value, AuthError> {
        self.post(paths::REFRESH_TOKEN, &serde_json::json!({ "refreshToken": refresh_token }), None)
            .await
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.post(paths::LOGOUT, &serde_json::json!({ "refreshToken": refresh_token }), None)
            .await
            .map(|_| ())
    }

    async fn change_password(&self, access_token: &str, request: &ChangePasswordRequest) -> Result<Value, AuthError> {
        self.post(paths::CHANGE_PASSWORD, request, Some(access_token)).await
    }

    async fn subscription(&self, access_token: &str) -> Result<Value, AuthError> {
        self.send(Method::Get, paths::SUBSCRIPTION, None, Some(access_token))
            .await
    }

    async fn verify_payment(&self, access_token: &str, reference: &str) -> Result<Value, AuthError> {
        self.send(Method::Get, &verify_payment_path(reference), None, Some(access_token))
            .await
    }
}

/// Google Identity bridge. The page script exposes
/// `window.qringGoogleCredential(clientId)` returning a promise of the ID token.
#[derive(Clone, Debug)]
pub struct GoogleIdentity {
    client_id: String,
}

impl GoogleIdentity {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self { client_id: config.google_client_id.clone() }
    }
}

#[cfg(feature = "hydrate")]
const GOOGLE_BRIDGE_FN: &str = "qringGoogleCredential";

impl IdentityProvider for GoogleIdentity {
    async fn google_credential(&self) -> Result<String, AuthError> {
        if self.client_id.is_empty() {
            return Err(AuthError::Identity("Google sign-in is not configured".to_owned()));
        }
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::{JsCast, JsValue};
            use wasm_bindgen_futures::JsFuture;

            let window = web_sys::window().ok_or_else(|| AuthError::Identity("no window".to_owned()))?;
            let bridge = js_sys::Reflect::get(&window, &JsValue::from_str(GOOGLE_BRIDGE_FN))
                .ok()
                .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
                .ok_or_else(|| AuthError::Identity("Google script not loaded".to_owned()))?;
            let promise = bridge
                .call1(&window, &JsValue::from_str(&self.client_id))
                .map_err(|e| AuthError::Identity(format!("{e:?}")))?;
            let credential = JsFuture::from(js_sys::Promise::from(promise))
                .await
                .map_err(|_| AuthError::Identity("sign-in was cancelled".to_owned()))?;
            credential
                .as_string()
                .filter(|c| !c.is_empty())
                .ok_or_else(|| AuthError::Identity("no credential returned".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

fn verify_payment_path(reference: &str) -> String {
    let encoded = percent_encoding::utf8_percent_encode(reference, percent_encoding::NON_ALPHANUMERIC);
    format!("{}/{encoded}", paths::PAYSTACK_VERIFY)
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Map a status line and raw body to the caller-facing result.
#[cfg(any(test, feature = "hydrate"))]
fn interpret_response(status: u16, ok: bool, text: &str) -> Result<Value, AuthError> {
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.trim().to_owned()))
    };
    if ok {
        return Ok(body);
    }
    let message = super::envelope::backend_message(&body).unwrap_or_else(|| request_failed_message(status));
    Err(AuthError::Rejected { status, message })
}
