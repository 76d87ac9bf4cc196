//! The signed-in principal.

use serde::{Deserialize, Serialize};

use ims_core::{Role, UserId};

/// Session-stored identity.
///
/// Built from a directory entry after a successful credential check. It has
/// no secret field, so serializing it into the session can never leak the
/// credential used to obtain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Directory identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address used to sign in.
    pub email: String,
    /// Role; always one of the closed set.
    pub role: Role,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    /// Whether this identity may create, edit or delete records.
    #[must_use]
    pub const fn can_manage_records(&self) -> bool {
        self.role.can_manage_records()
    }

    /// Whether this identity is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Up to two initials, used when there is no avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Session keys for console state.
pub mod keys {
    /// Key holding the serialized [`super::Identity`].
    pub const CURRENT_IDENTITY: &str = "current_identity";

    /// Key holding the one-shot flash message.
    pub const FLASH: &str = "flash";

    /// Key holding per-session notification preferences.
    pub const NOTIFICATION_PREFERENCES: &str = "notification_preferences";
}
