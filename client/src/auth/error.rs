//! Auth and API error type.
//!
//! Every variant renders as one human-readable line, which is exactly what
//! forms show to the user. Nothing here is fatal; the user retries.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Form input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A success response that did not carry both a token and a user.
    #[error("the server response did not include a session")]
    MissingToken,
    /// The Google Identity flow failed or was dismissed.
    #[error("Google sign-in failed: {0}")]
    Identity(String),
    /// No stored session to act on.
    #[error("you are not signed in")]
    NotSignedIn,
    #[error("no dashboard is configured for role `{0}`")]
    UnmappedRole(String),
    /// Browser-only operation invoked during server render.
    #[error("not available on server")]
    Unavailable,
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Backend rejected the access token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}
