//! Last-write-wins bookkeeping for overlapping lookups.
//!
//! When the user switches location while a lookup is still in flight, the
//! older result may arrive after the newer one. Each lookup takes a
//! [`RequestToken`] up front; only the most recently issued token may apply
//! its result. Nothing is cancelled, stale results are simply dropped.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new lookup; every earlier token becomes stale.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Store `value` in `slot` if `token` is still current. Returns whether
    /// the value was applied.
    pub fn accept<T>(&self, token: RequestToken, value: T, slot: &mut Option<T>) -> bool {
        if !self.is_current(token) {
            tracing::debug!(?token, "discarding stale result");
            return false;
        }
        *slot = Some(value);
        true
    }
}
