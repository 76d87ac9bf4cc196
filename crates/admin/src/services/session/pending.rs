//! Login round trips in flight, per browser session.
//!
//! A login request holds a [`PendingLogin`] for the duration of its delay.
//! Any other request from the same browser session that arrives meanwhile
//! sees the session as resolving.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared tracker of in-flight logins, keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct PendingLogins {
    inner: Arc<Mutex<HashMap<String, usize>>>,
}

impl PendingLogins {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        // The map holds plain counters, so a poisoned lock is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark a login as started; it ends when the returned guard is dropped.
    #[must_use]
    pub fn begin(&self, key: impl Into<String>) -> PendingLogin {
        let key = key.into();
        *self.lock().entry(key.clone()).or_insert(0) += 1;
        PendingLogin {
            owner: self.clone(),
            key,
        }
    }

    /// Whether a login is in flight for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Number of browser sessions with a login in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Guard for one in-flight login.
#[derive(Debug)]
pub struct PendingLogin {
    owner: PendingLogins,
    key: String,
}

impl Drop for PendingLogin {
    fn drop(&mut self) {
        let mut pending = self.owner.lock();
        if let Some(count) = pending.get_mut(&self.key) {
            *count -= 1;
            if *count == 0 {
                pending.remove(&self.key);
            }
        }
    }
}
