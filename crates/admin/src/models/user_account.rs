//! Console user accounts managed from the user administration screen.

use secrecy::SecretString;

use ims_core::{Role, UserId};

use crate::db::Record;
use crate::models::Identity;

/// A user account as listed on the user administration screen.
#[derive(Clone)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub password: SecretString,
}

impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("avatar", &self.avatar)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl UserAccount {
    /// Whether this account belongs to the signed-in identity.
    #[must_use]
    pub fn is_identity(&self, identity: &Identity) -> bool {
        self.id == identity.id
    }

    /// Avatar URL for the account, falling back to a generated one.
    #[must_use]
    pub fn avatar_url(&self) -> String {
        self.avatar.clone().unwrap_or_else(|| {
            format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                urlencoding::encode(&self.name)
            )
        })
    }
}

impl Record for UserAccount {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        &self.id
    }

    fn with_id(self, id: UserId) -> Self {
        Self { id, ..self }
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("email", self.email.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let account = UserAccount {
            id: UserId::new("4"),
            name: "New Hire".to_string(),
            email: "new@example.com".to_string(),
            role: Role::User,
            avatar: None,
            password: SecretString::from("hunter22"),
        };

        let debug_output = format!("{account:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter22"));
        assert!(account.avatar_url().ends_with("seed=New%20Hire"));
    }
}
