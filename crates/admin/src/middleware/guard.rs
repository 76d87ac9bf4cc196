//! Route guard decision.
//!
//! Given the current [`SessionState`] and a screen's optional role
//! allow-list, decide what the visitor gets. Evaluated on every request;
//! nothing is cached between requests.

use ims_core::Role;

use crate::models::Identity;
use crate::services::SessionState;

/// Path of the login screen.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path of the default landing screen.
pub const LANDING_PATH: &str = "/";

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session has not settled; show a waiting indicator and nothing else.
    Resolving,
    /// Nobody is signed in.
    RedirectToLogin,
    /// Signed in, but the role is not on the screen's allow-list.
    RedirectToLanding,
    /// Render the screen for this identity.
    Render(Identity),
}

/// Decide what to show for `state` on a screen restricted to `allowed`.
#[must_use]
pub fn evaluate(state: &SessionState, allowed: Option<&[Role]>) -> GuardDecision {
    if state.resolving {
        return GuardDecision::Resolving;
    }
    match &state.identity {
        None => GuardDecision::RedirectToLogin,
        Some(identity) if allowed.is_some_and(|roles| !roles.contains(&identity.role)) => {
            GuardDecision::RedirectToLanding
        }
        Some(identity) => GuardDecision::Render(identity.clone()),
    }
}

#[cfg(test)]
mod tests {
    use ims_core::UserId;

    use super::*;

    fn signed_in(role: Role) -> SessionState {
        SessionState::resolved(Some(Identity {
            id: UserId::new("1"),
            name: "Someone".to_string(),
            email: "someone@example.com".to_string(),
            role,
            avatar: None,
        }))
    }

    #[test]
    fn test_resolving_decides_nothing() {
        for allowed in [None, Some(&[Role::Admin][..])] {
            assert_eq!(evaluate(&SessionState::initial(), allowed), GuardDecision::Resolving);
        }

        let mut state = signed_in(Role::Admin);
        state.resolving = true;
        assert_eq!(evaluate(&state, None), GuardDecision::Resolving);
    }

    #[test]
    fn test_signed_out_goes_to_login() {
        let state = SessionState::resolved(None);
        assert_eq!(evaluate(&state, None), GuardDecision::RedirectToLogin);
        assert_eq!(
            evaluate(&state, Some(&[Role::Admin])),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_admin_only_screen() {
        let admin_only: &[Role] = &[Role::Admin];

        assert_eq!(
            evaluate(&signed_in(Role::Manager), Some(admin_only)),
            GuardDecision::RedirectToLanding
        );
        assert_eq!(
            evaluate(&signed_in(Role::User), Some(admin_only)),
            GuardDecision::RedirectToLanding
        );
        assert!(matches!(
            evaluate(&signed_in(Role::Admin), Some(admin_only)),
            GuardDecision::Render(identity) if identity.role == Role::Admin
        ));
    }

    #[test]
    fn test_no_allow_list_admits_every_role() {
        for role in Role::ALL {
            assert!(matches!(
                evaluate(&signed_in(role), None),
                GuardDecision::Render(_)
            ));
        }
    }
}
