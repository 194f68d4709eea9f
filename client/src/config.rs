//! Build-time client configuration.
//!
//! DESIGN
//! ======
//! The WASM bundle has no process environment at runtime, so endpoints are
//! baked in at compile time through `option_env!` and fall back to defaults
//! that assume the API is reverse-proxied under `/api`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the external Qring REST API, without trailing `/`.
    pub api_base_url: String,
    /// Google Identity client id; empty disables Google sign-in buttons.
    pub google_client_id: String,
    /// Hosted checkout page the paywall links out to; empty hides the link.
    pub checkout_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, "")
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(api_base_url: &str, google_client_id: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            google_client_id: google_client_id.trim().to_owned(),
            checkout_url: String::new(),
        }
    }

    #[must_use]
    pub fn with_checkout_url(mut self, checkout_url: &str) -> Self {
        self.checkout_url = checkout_url.trim().to_owned();
        self
    }

    /// Resolve from `QRING_API_BASE_URL`, `QRING_GOOGLE_CLIENT_ID` and
    /// `QRING_CHECKOUT_URL` at compile time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("QRING_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL),
            option_env!("QRING_GOOGLE_CLIENT_ID").unwrap_or(""),
        )
        .with_checkout_url(option_env!("QRING_CHECKOUT_URL").unwrap_or(""))
    }

    /// Join the base URL with an API path such as `/auth/login`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.api_base_url)
    }

    #[must_use]
    pub fn google_enabled(&self) -> bool {
        !self.google_client_id.is_empty()
    }

    /// The checkout page to link out to, when one is configured.
    #[must_use]
    pub fn checkout_link(&self) -> Option<&str> {
        Some(self.checkout_url.as_str()).filter(|url| !url.is_empty())
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_owned()
    } else {
        trimmed.to_owned()
    }
}
