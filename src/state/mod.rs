//! Client-side state containers.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `toast`) and composed into one
//! [`Store`]. Each slice only changes through its own named transitions and
//! hands out immutable snapshots or `watch` receivers.

pub mod session;
pub mod toast;

use session::SessionStore;
use toast::ToastQueue;

/// Root store shared by every view.
#[derive(Debug, Default)]
pub struct Store {
    pub session: SessionStore,
    pub toasts: ToastQueue,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
