//! One-shot notifications shown on the next rendered page.
//!
//! A handler that redirects after a mutation pushes a [`Flash`] into the
//! browser session; the layout of the next page takes it out again, so each
//! message is shown exactly once.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Error,
}

/// A notification with a short title and a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub title: String,
    pub message: String,
}

impl Flash {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// CSS class of the toast.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            FlashLevel::Success => "toast toast-success",
            FlashLevel::Error => "toast toast-error",
        }
    }

    /// Store this notification for the next page.
    ///
    /// A notification that cannot be stored is logged and dropped.
    pub async fn push(self, session: &Session) {
        if let Err(e) = session.insert(session_keys::FLASH, &self).await {
            tracing::warn!(error = %e, title = %self.title, "failed to store flash message");
        }
    }

    /// Take the pending notification, if any.
    pub async fn take(session: &Session) -> Option<Self> {
        session
            .remove::<Self>(session_keys::FLASH)
            .await
            .ok()
            .flatten()
    }
}
