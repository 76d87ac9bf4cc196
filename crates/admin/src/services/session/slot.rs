//! Durable storage for the serialized identity.

use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tower_sessions::Session;

use crate::models::session_keys;

/// Errors writing to a [`SessionSlot`].
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("session storage error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("slot lock poisoned")]
    Poisoned,
}

/// A single durable slot holding the serialized identity as text.
///
/// Reads never fail: anything unreadable is reported as an empty slot.
pub trait SessionSlot: Send + Sync {
    /// The stored text, if any.
    fn load(&self) -> impl Future<Output = Option<String>> + Send;

    /// Replace the stored text.
    fn store(&self, value: String) -> impl Future<Output = Result<(), SlotError>> + Send;

    /// Empty the slot.
    fn clear(&self) -> impl Future<Output = Result<(), SlotError>> + Send;
}

/// Slot backed by the browser's cookie-bound `tower-sessions` session.
#[derive(Debug, Clone)]
pub struct TowerSessionSlot {
    session: Session,
}

impl TowerSessionSlot {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl SessionSlot for TowerSessionSlot {
    async fn load(&self) -> Option<String> {
        match self
            .session
            .get::<String>(session_keys::CURRENT_IDENTITY)
            .await
        {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(%error, "unreadable identity slot");
                None
            }
        }
    }

    async fn store(&self, value: String) -> Result<(), SlotError> {
        self.session
            .insert(session_keys::CURRENT_IDENTITY, value)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SlotError> {
        self.session
            .remove_value(session_keys::CURRENT_IDENTITY)
            .await?;
        Ok(())
    }
}

/// Process-local slot.
///
/// Clones share the same slot, so a fresh store built over a clone sees what
/// an earlier store wrote, the way a reloaded page sees browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    /// A slot pre-filled with `value`.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    /// The raw slot contents.
    #[must_use]
    pub fn peek(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }
}

impl SessionSlot for MemorySlot {
    async fn load(&self) -> Option<String> {
        self.peek()
    }

    async fn store(&self, value: String) -> Result<(), SlotError> {
        let mut slot = self.value.lock().map_err(|_| SlotError::Poisoned)?;
        *slot = Some(value);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SlotError> {
        let mut slot = self.value.lock().map_err(|_| SlotError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}
