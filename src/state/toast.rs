//! Toast notifications currently on screen.
//!
//! Presentation-only: nothing here is persisted, and a toast has no identity
//! beyond the id it gets while displayed.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::util::toast::Toast;

pub type ToastId = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShownToast {
    pub id: ToastId,
    pub toast: Toast,
}

#[derive(Debug)]
pub struct ToastQueue {
    tx: watch::Sender<Vec<ShownToast>>,
    next_id: AtomicU64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx, next_id: AtomicU64::new(1) }
    }

    /// Show `toast`; newest last.
    pub fn push(&self, toast: Toast) -> ToastId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.tx.send_modify(|shown| shown.push(ShownToast { id, toast }));
        id
    }

    /// Remove one toast. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.tx.send_if_modified(|shown| {
            let before = shown.len();
            shown.retain(|t| t.id != id);
            shown.len() != before
        })
    }

    pub fn clear(&self) {
        self.tx.send_if_modified(|shown| {
            let had_any = !shown.is_empty();
            shown.clear();
            had_any
        });
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<ShownToast> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<ShownToast>> {
        self.tx.subscribe()
    }
}
