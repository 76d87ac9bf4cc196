//! Page chrome shared by every signed-in screen: sidebar navigation, the
//! header identity badge and the notification area.

use crate::flash::Flash;
use crate::models::Identity;

/// Signed-in identity as shown in the header.
#[derive(Debug, Clone)]
pub struct IdentityView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub avatar: Option<String>,
    pub initials: String,
    pub is_admin: bool,
    pub can_manage_records: bool,
}

impl From<&Identity> for IdentityView {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role.label(),
            avatar: identity.avatar.clone(),
            initials: identity.initials(),
            is_admin: identity.is_admin(),
            can_manage_records: identity.can_manage_records(),
        }
    }
}

/// A sidebar link.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 8] = [
    ("Dashboard", "/"),
    ("Inventory", "/inventory"),
    ("Orders", "/orders"),
    ("Warehouses", "/warehouses"),
    ("Customers", "/customers"),
    ("Shipments", "/shipments"),
    ("Reports", "/reports"),
    ("Settings", "/settings"),
];

/// Whether `current_path` is `href` or a page below it.
fn is_active(href: &str, current_path: &str) -> bool {
    if href == "/" {
        current_path == "/"
    } else {
        current_path == href
            || current_path
                .strip_prefix(href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Sidebar links for `identity`; user administration is listed for admins only.
#[must_use]
pub fn nav_items(identity: &Identity, current_path: &str) -> Vec<NavItem> {
    let users = identity.is_admin().then_some(("Users", "/users"));
    NAV.into_iter()
        .chain(users)
        .map(|(label, href)| NavItem {
            label,
            href,
            active: is_active(href, current_path),
        })
        .collect()
}

/// Everything the layout template needs besides the page body.
#[derive(Debug, Clone)]
pub struct ShellView {
    pub identity: IdentityView,
    pub nav: Vec<NavItem>,
    pub current_path: String,
    pub flash: Option<Flash>,
    pub company_name: String,
}

impl ShellView {
    #[must_use]
    pub fn new(
        identity: &Identity,
        current_path: &str,
        flash: Option<Flash>,
        company_name: String,
    ) -> Self {
        Self {
            identity: IdentityView::from(identity),
            nav: nav_items(identity, current_path),
            current_path: current_path.to_string(),
            flash,
            company_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use ims_core::{Role, UserId};

    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: UserId::new("1"),
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            role,
            avatar: None,
        }
    }

    #[test]
    fn test_users_link_only_for_admins() {
        let labels = |role| -> Vec<&str> {
            nav_items(&identity(role), "/").iter().map(|i| i.label).collect()
        };
        assert!(labels(Role::Admin).contains(&"Users"));
        assert!(!labels(Role::Manager).contains(&"Users"));
        assert!(!labels(Role::User).contains(&"Users"));
        assert_eq!(labels(Role::User).len(), 8);
    }

    #[test]
    fn test_active_link_matches_section() {
        let items = nav_items(&identity(Role::Admin), "/orders/ORD-001/edit");
        let active: Vec<_> = items.iter().filter(|i| i.active).map(|i| i.label).collect();
        assert_eq!(active, ["Orders"]);

        let items = nav_items(&identity(Role::Admin), "/");
        let active: Vec<_> = items.iter().filter(|i| i.active).map(|i| i.label).collect();
        assert_eq!(active, ["Dashboard"]);
    }

    #[test]
    fn test_identity_view() {
        let view = IdentityView::from(&identity(Role::Manager));
        assert_eq!(view.initials, "AU");
        assert_eq!(view.role, "Manager");
        assert!(view.can_manage_records);
        assert!(!view.is_admin);
    }
}
