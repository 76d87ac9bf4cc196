//! Session store: who is signed in.
//!
//! A [`SessionStore`] owns the current [`Identity`] for one browser session
//! and is the only thing allowed to change it. State changes are published on
//! a `tokio::sync::watch` channel so callers can observe the resolving flag
//! settle instead of reading a half-initialized session.
//!
//! ```text
//!   new() ──► { resolving, none } ──restore()──► { idle, restored-or-none }
//!                                                     │           ▲
//!                                              login()│           │ delay elapsed
//!                                                     ▼           │
//!                                          { resolving, unchanged }
//! ```

mod pending;
mod slot;

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use crate::models::Identity;
use crate::services::auth::AuthProvider;

pub use pending::{PendingLogin, PendingLogins};
pub use slot::{MemorySlot, SessionSlot, SlotError, TowerSessionSlot};

/// Snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub resolving: bool,
    pub identity: Option<Identity>,
}

impl SessionState {
    /// State before the slot has been read.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            resolving: true,
            identity: None,
        }
    }

    /// Settled state holding `identity`.
    #[must_use]
    pub const fn resolved(identity: Option<Identity>) -> Self {
        Self {
            resolving: false,
            identity,
        }
    }
}

/// Clears the resolving flag when a login ends, including when the login
/// future is dropped mid-delay.
struct ResolvingGuard<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl Drop for ResolvingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.resolving = false);
    }
}

/// Owner of the signed-in identity for one browser session.
pub struct SessionStore<S, A> {
    slot: S,
    provider: A,
    login_delay: Duration,
    state: watch::Sender<SessionState>,
}

impl<S: SessionSlot, A: AuthProvider> SessionStore<S, A> {
    /// Create a store in the initial resolving state.
    pub fn new(slot: S, provider: A, login_delay: Duration) -> Self {
        Self {
            slot,
            provider,
            login_delay,
            state: watch::Sender::new(SessionState::initial()),
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Current identity, regardless of the resolving flag.
    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Wait until the resolving flag is clear and return that state.
    pub async fn wait_resolved(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|s| !s.resolving).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.state(),
        }
    }

    /// Adopt whatever identity the slot holds.
    ///
    /// Missing or malformed slot content leaves the session signed out.
    /// Always ends with the resolving flag clear.
    pub async fn restore(&self) -> SessionState {
        let identity = match self.slot.load().await {
            Some(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(error) => {
                    tracing::debug!(%error, "ignoring malformed identity slot");
                    None
                }
            },
            None => None,
        };

        self.state.send_modify(|s| {
            s.identity = identity;
            s.resolving = false;
        });
        self.state()
    }

    /// Check credentials after the configured delay.
    ///
    /// On success the identity is written to the slot and adopted. On
    /// failure the current identity is left as it was. The resolving flag
    /// is set for the duration of the call.
    pub async fn login(&self, email: &str, secret: &str) -> bool {
        self.state.send_modify(|s| s.resolving = true);
        let _resolving = ResolvingGuard { state: &self.state };

        tokio::time::sleep(self.login_delay).await;

        let Some(identity) = self.provider.verify(email, secret) else {
            tracing::warn!(email, "login failed");
            return false;
        };

        let serialized = match serde_json::to_string(&identity) {
            Ok(serialized) => serialized,
            Err(error) => {
                tracing::error!(%error, "failed to serialize identity");
                return false;
            }
        };
        if let Err(error) = self.slot.store(serialized).await {
            tracing::error!(%error, "failed to persist identity");
            return false;
        }

        tracing::info!(email = %identity.email, role = %identity.role, "login succeeded");
        self.state.send_modify(|s| s.identity = Some(identity));
        true
    }

    /// Forget the identity and empty the slot.
    pub async fn logout(&self) {
        let previous = self.identity();
        self.state.send_modify(|s| s.identity = None);

        if let Err(error) = self.slot.clear().await {
            tracing::warn!(%error, "failed to clear identity slot");
        }
        if let Some(identity) = previous {
            tracing::info!(email = %identity.email, "logged out");
        }
    }
}
