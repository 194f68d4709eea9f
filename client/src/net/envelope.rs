//! Auth response envelope normalization.
//!
//! DESIGN
//! ======
//! The backend answers auth calls as `{data: {data: {...}}}`, `{data: {...}}`
//! or a bare object depending on the endpoint. Instead of probing optional
//! paths at every call site, every auth body passes through
//! [`normalize_auth_response`], which walks at most two `data` levels and
//! returns one canonical token/user triple.
//!
//! Role resolution order for the user: `user.role`, `user.userRole`, the
//! access token's `role` claim, then none.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde_json::{Map, Value};

use super::token::token_role;
use super::types::User;

/// Maximum number of `data` wrappers peeled off a response.
pub const MAX_ENVELOPE_DEPTH: usize = 2;

const ACCESS_TOKEN_KEYS: [&str; 3] = ["accessToken", "access_token", "token"];
const REFRESH_TOKEN_KEYS: [&str; 2] = ["refreshToken", "refresh_token"];

/// Canonical `{accessToken, refreshToken, user}` triple.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthPayload {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}

impl AuthPayload {
    /// Both halves of an authenticated session were recovered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}

/// Normalize a possibly wrapped auth response body.
pub fn normalize_auth_response(body: &Value) -> AuthPayload {
    let levels = envelope_levels(body);

    let access_token = innermost_string(&levels, &ACCESS_TOKEN_KEYS);
    let refresh_token = innermost_string(&levels, &REFRESH_TOKEN_KEYS);
    let user = levels
        .iter()
        .rev()
        .find_map(|level| level.get("user").and_then(Value::as_object))
        .and_then(|raw| resolve_user(raw, access_token.as_deref()));

    AuthPayload { access_token, refresh_token, user }
}

/// The innermost object level of a wrapped body (or the body itself).
pub fn innermost_payload(body: &Value) -> Value {
    envelope_levels(body)
        .last()
        .map_or_else(|| body.clone(), |level| Value::Object((*level).clone()))
}

/// Human-readable error text carried by a response body, if any.
pub fn backend_message(body: &Value) -> Option<String> {
    if let Some(text) = non_empty(body.as_str()) {
        return Some(text);
    }
    envelope_levels(body).iter().find_map(|level| {
        non_empty(level.get("message").and_then(Value::as_str))
            .or_else(|| non_empty(level.get("error").and_then(Value::as_str)))
            .or_else(|| {
                non_empty(
                    level
                        .get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(Value::as_str),
                )
            })
    })
}

/// Object levels from outermost to innermost: `body`, `body.data`, `body.data.data`.
fn envelope_levels(body: &Value) -> Vec<&Map<String, Value>> {
    let mut levels = Vec::with_capacity(MAX_ENVELOPE_DEPTH + 1);
    let mut current = body.as_object();
    while let Some(level) = current {
        levels.push(level);
        if levels.len() > MAX_ENVELOPE_DEPTH {
            break;
        }
        current = level.get("data").and_then(Value::as_object);
    }
    levels
}

fn innermost_string(levels: &[&Map<String, Value>], keys: &[&str]) -> Option<String> {
    levels
        .iter()
        .rev()
        .find_map(|level| keys.iter().find_map(|key| non_empty(level.get(*key).and_then(Value::as_str))))
}

fn resolve_user(raw: &Map<String, Value>, access_token: Option<&str>) -> Option<User> {
    let role = non_empty(raw.get("role").and_then(Value::as_str))
        .or_else(|| non_empty(raw.get("userRole").and_then(Value::as_str)))
        .or_else(|| access_token.and_then(token_role));

    let mut fields = raw.clone();
    fields.remove("role");
    if let Some(id) = identifier(raw) {
        fields.insert("id".to_owned(), Value::String(id));
    }

    let mut user: User = serde_json::from_value(Value::Object(fields)).ok()?;
    user.role = role;
    Some(user)
}

/// `id` or Mongo-style `_id`, accepting numeric identifiers.
fn identifier(raw: &Map<String, Value>) -> Option<String> {
    ["id", "_id"].iter().find_map(|key| match raw.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}
