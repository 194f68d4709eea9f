//! Host configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `PORT` is set but is not a valid TCP port.
    #[error("invalid PORT '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Overrides the Leptos `site-root` (where `pkg/` is served from).
    pub site_root: Option<PathBuf>,
}

impl HostConfig {
    /// Build host config from the process environment. `main` loads `.env`
    /// first.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `QRING_SITE_ROOT`: default from `[package.metadata.leptos]`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] for a non-numeric or zero `PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parse_port(std::env::var("PORT").ok().as_deref())?,
            site_root: parse_site_root(std::env::var("QRING_SITE_ROOT").ok().as_deref()),
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_PORT);
    };
    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidPort(raw.to_owned())),
        Ok(port) => Ok(port),
    }
}

fn parse_site_root(raw: Option<&str>) -> Option<PathBuf> {
    raw.map(str::trim).filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
