//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CURRENT_PATH: &str = "/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed or cannot carry a path.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The current path does not start with `/`.
    #[error("invalid current path '{0}': must start with '/'")]
    InvalidCurrentPath(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

/// Where the client talks to and what location it pretends to be on.
///
/// `current_path` stands in for the browser's `window.location.pathname`: it is
/// the path carried through the login redirect so the user lands back on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub current_path: String,
    pub session_cookie: Option<String>,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for `base_url` with default path and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse or is
    /// not a hierarchical (`http://`-style) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            current_path: DEFAULT_CURRENT_PATH.to_owned(),
            session_cookie: None,
            timeouts: Timeouts::default(),
        })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `QUIZ_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `QUIZ_CURRENT_PATH`: default `/`
    /// - `QUIZ_SESSION_COOKIE`: raw `Cookie` header value to send with every request
    /// - `QUIZ_REQUEST_TIMEOUT_SECS`: default 30
    /// - `QUIZ_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base URL or current path is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("QUIZ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let current_path = std::env::var("QUIZ_CURRENT_PATH").unwrap_or_else(|_| DEFAULT_CURRENT_PATH.to_owned());
        let session_cookie = std::env::var("QUIZ_SESSION_COOKIE")
            .ok()
            .filter(|s| !s.is_empty());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("QUIZ_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("QUIZ_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Self::new(&base_url)?
            .with_current_path(&current_path)
            .map(|cfg| Self { session_cookie, timeouts, ..cfg })
    }

    /// Replace the current path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrentPath`] unless `path` starts with `/`.
    pub fn with_current_path(self, path: &str) -> Result<Self, ConfigError> {
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidCurrentPath(path.to_owned()));
        }
        Ok(Self { current_path: path.to_owned(), ..self })
    }

    #[must_use]
    pub fn with_session_cookie(self, cookie: Option<String>) -> Self {
        Self { session_cookie: cookie, ..self }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBaseUrl { url: raw.to_owned(), reason: e.to_string() })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl { url: raw.to_owned(), reason: "not a base URL".to_owned() });
    }
    Ok(url)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
