//! Console roles.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// Role of a signed-in identity.
///
/// The set is closed: serde and [`FromStr`](std::str::FromStr) reject any
/// other value, so a deserialized identity can never carry an unknown role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including user administration.
    Admin,
    /// Can create, edit and delete records.
    Manager,
    /// Read-only access to record screens.
    User,
}

impl Role {
    /// All roles, in the order they are offered in role pickers.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Manager, Self::User];

    /// Wire name (`admin`, `manager`, `user`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::User => "user",
        }
    }

    /// Human label (`Admin`, `Manager`, `User`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::User => "User",
        }
    }

    /// Whether this role may create, edit or delete records.
    #[must_use]
    pub const fn can_manage_records(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "user" => Ok(Self::User),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_role_back_from_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_rejects_unknown_roles() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }

    #[test]
    fn test_only_admins_and_managers_manage_records() {
        assert!(Role::Admin.can_manage_records());
        assert!(Role::Manager.can_manage_records());
        assert!(!Role::User.can_manage_records());
    }
}
