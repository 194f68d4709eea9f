//! Unverified JWT payload decoding.
//!
//! The client never validates signatures; it only peeks at the payload to
//! recover a `role` claim when the backend omits one from the user object.
//! Anything that does not look like a JWT decodes to `None`.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

/// Claims the client cares about. Unknown claims are ignored, and each claim
/// is read on its own so an oddly typed `sub` or `exp` never hides the role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenClaims {
    pub role: Option<String>,
    pub sub: Option<String>,
    pub exp: Option<i64>,
}

impl TokenClaims {
    fn from_payload(claims: &Map<String, Value>) -> Self {
        Self {
            role: claims.get("role").and_then(Value::as_str).map(str::to_owned),
            sub: claims.get("sub").and_then(claim_text),
            exp: claims.get("exp").and_then(claim_seconds),
        }
    }
}

/// Decode the middle segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = payload_segment(token)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let payload: Value = serde_json::from_slice(&bytes).ok()?;
    Some(TokenClaims::from_payload(payload.as_object()?))
}

/// The token's `role` claim, if it decodes and carries a non-empty one.
pub fn token_role(token: &str) -> Option<String> {
    decode_claims(token)?.role.filter(|role| !role.trim().is_empty())
}

fn payload_segment(token: &str) -> Option<&str> {
    let mut parts = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if payload.is_empty() { None } else { Some(payload) }
}

fn claim_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn claim_seconds(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().filter(|secs| secs.is_finite()).map(|secs| secs as i64))
}
