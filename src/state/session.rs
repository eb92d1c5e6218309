//! Session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is never persisted client-side; it is re-derived from the
//! server by [`SessionStore::fetch_current_user`]. Views subscribe to
//! [`Session`] snapshots and decide between the login screen and the app.
//!
//! DESIGN
//! ======
//! The store exposes exactly two transitions: a fetch that passes through the
//! loading state, and a direct set used after explicit login/logout.
//! Overlapping fetches are not sequenced; whichever response arrives last
//! wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tokio::sync::watch;

use crate::net::ApiClient;
use crate::net::outcome::ApiOutcome;
use crate::net::types::User;

/// Immutable view of the session at one point in time.
///
/// `is_logged_in` always equals `user.is_some()`; construct through
/// [`Session::with_user`] or [`Session::default`] to keep that true.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub is_logged_in: bool,
    pub user: Option<User>,
    pub is_loading_user: bool,
}

impl Session {
    #[must_use]
    pub fn with_user(user: Option<User>) -> Self {
        Self { is_logged_in: user.is_some(), user, is_loading_user: false }
    }
}

/// Where the session store gets the current user from.
#[async_trait::async_trait]
pub trait UserSource: Send + Sync {
    async fn current_user(&self) -> ApiOutcome<User>;
}

#[async_trait::async_trait]
impl UserSource for ApiClient {
    async fn current_user(&self) -> ApiOutcome<User> {
        self.get_user().await
    }
}

#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Session>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::default());
        Self { tx }
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Ask `source` who the user is. The store is in the loading state until
    /// it answers; any non-success outcome clears the user.
    pub async fn fetch_current_user(&self, source: &dyn UserSource) {
        self.tx.send_modify(|session| session.is_loading_user = true);
        let user = match source.current_user().await {
            ApiOutcome::Success(user) => Some(user),
            ApiOutcome::Redirect(redirect) => {
                tracing::debug!(url = %redirect.url(), "no session; user cleared");
                None
            }
            ApiOutcome::Failure(err) => {
                tracing::debug!(error = %err, "current user fetch failed; user cleared");
                None
            }
        };
        self.set_current_user(user);
    }

    /// Replace the user and leave the loading state.
    pub fn set_current_user(&self, user: Option<User>) {
        self.tx.send_replace(Session::with_user(user));
    }
}
