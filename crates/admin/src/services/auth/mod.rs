//! Credential verification.
//!
//! [`AuthProvider`] is the seam between the session store and wherever
//! credentials live. The console ships with [`StaticDirectory`], a fixed
//! list of accounts compiled into the binary.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use ims_core::{Role, UserId};

use crate::models::Identity;

/// Checks an email/secret pair and yields the matching identity.
pub trait AuthProvider: Send + Sync {
    /// Returns the identity whose credentials match exactly, if any.
    ///
    /// Implementations must not distinguish "unknown email" from "wrong
    /// secret" in their result.
    fn verify(&self, email: &str, secret: &str) -> Option<Identity>;
}

impl<T: AuthProvider + ?Sized> AuthProvider for Arc<T> {
    fn verify(&self, email: &str, secret: &str) -> Option<Identity> {
        (**self).verify(email, secret)
    }
}

impl<T: AuthProvider + ?Sized> AuthProvider for &T {
    fn verify(&self, email: &str, secret: &str) -> Option<Identity> {
        (**self).verify(email, secret)
    }
}

/// One account in the directory.
#[derive(Clone)]
pub struct DirectoryEntry {
    pub identity: Identity,
    secret: SecretString,
}

impl DirectoryEntry {
    #[must_use]
    pub const fn new(identity: Identity, secret: SecretString) -> Self {
        Self { identity, secret }
    }

    /// The plaintext credential for this entry.
    #[must_use]
    pub const fn secret(&self) -> &SecretString {
        &self.secret
    }

    fn matches(&self, email: &str, secret: &str) -> bool {
        self.identity.email == email && self.secret.expose_secret() == secret
    }
}

impl std::fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryEntry")
            .field("identity", &self.identity)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A fixed, in-process account directory.
///
/// Secrets are compared in plaintext, case-sensitively, against each entry
/// in order; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    entries: Vec<DirectoryEntry>,
}

impl StaticDirectory {
    #[must_use]
    pub const fn new(entries: Vec<DirectoryEntry>) -> Self {
        Self { entries }
    }

    /// The three built-in demo accounts, all with the secret `password`.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |id: &str, name: &str, email: &str, role: Role, seed: &str| {
            DirectoryEntry::new(
                Identity {
                    id: UserId::new(id),
                    name: name.to_string(),
                    email: email.to_string(),
                    role,
                    avatar: Some(format!(
                        "https://api.dicebear.com/7.x/avataaars/svg?seed={seed}"
                    )),
                },
                SecretString::from("password"),
            )
        };

        Self::new(vec![
            entry("1", "Admin User", "admin@example.com", Role::Admin, "Admin"),
            entry("2", "Manager User", "manager@example.com", Role::Manager, "Manager"),
            entry("3", "Regular User", "user@example.com", Role::User, "User"),
        ])
    }

    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }
}

impl AuthProvider for StaticDirectory {
    fn verify(&self, email: &str, secret: &str) -> Option<Identity> {
        self.entries
            .iter()
            .find(|entry| entry.matches(email, secret))
            .map(|entry| entry.identity.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_account_verifies() {
        let directory = StaticDirectory::builtin();
        for entry in directory.entries() {
            let identity = directory
                .verify(&entry.identity.email, entry.secret().expose_secret())
                .unwrap();
            assert_eq!(identity, entry.identity);
        }
    }

    #[test]
    fn test_builtin_roles() {
        let directory = StaticDirectory::builtin();
        let role = |email: &str| directory.verify(email, "password").unwrap().role;
        assert_eq!(role("admin@example.com"), Role::Admin);
        assert_eq!(role("manager@example.com"), Role::Manager);
        assert_eq!(role("user@example.com"), Role::User);
    }

    #[test]
    fn test_comparison_is_exact() {
        let directory = StaticDirectory::builtin();
        assert!(directory.verify("ADMIN@example.com", "password").is_none());
        assert!(directory.verify("admin@example.com", "Password").is_none());
        assert!(directory.verify(" admin@example.com", "password").is_none());
        assert!(directory.verify("admin@example.com", "").is_none());
        assert!(directory.verify("nobody@example.com", "password").is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let directory = StaticDirectory::builtin();
        let debug_output = format!("{directory:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("\"password\""));
    }

    #[test]
    fn test_arc_provider_delegates() {
        let provider: Arc<dyn AuthProvider> = Arc::new(StaticDirectory::builtin());
        assert!(provider.verify("user@example.com", "password").is_some());
    }
}
