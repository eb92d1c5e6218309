//! Session-expiry recovery: the login redirect effect.
//!
//! SYSTEM CONTEXT
//! ==============
//! A 401 from any endpoint other than login means the server-side session is
//! gone. The session can only be re-established through the server-rendered
//! login page, so the client hands a [`LoginRedirect`] to its [`Navigator`]
//! instead of reporting an error. The original path travels along as the
//! `path` query parameter so the login page can send the user back.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use std::sync::Mutex;

use reqwest::Url;

pub const LOGIN_PATH: &str = "/login";

/// Target of a forced navigation to the login page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginRedirect {
    url: Url,
}

impl LoginRedirect {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The path the user should return to after logging in.
    #[must_use]
    pub fn return_path(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == "path")
            .map(|(_, value)| value.into_owned())
    }
}

/// Build the login URL for a user currently at `current_path` on `location`.
///
/// The location's own query string is kept and `path` is appended to it.
#[must_use]
pub fn login_redirect_url(location: &Url, current_path: &str) -> Url {
    let mut url = location.clone();
    url.set_path(LOGIN_PATH);
    url.set_fragment(None);
    url.query_pairs_mut().append_pair("path", current_path);
    url
}

/// Performs full-page navigations on behalf of the API client.
pub trait Navigator: Send + Sync {
    fn navigate(&self, redirect: &LoginRedirect);
}

/// Navigator for headless use: logs the target and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, redirect: &LoginRedirect) {
        tracing::warn!(url = %redirect.url(), "session expired; login required");
    }
}

/// Navigator that remembers every redirect it was asked to perform.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<LoginRedirect>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn visits(&self) -> Vec<LoginRedirect> {
        self.visits
            .lock()
            .map(|visits| visits.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.visits.lock().map(|visits| visits.len()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, redirect: &LoginRedirect) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(redirect.clone());
        }
    }
}
