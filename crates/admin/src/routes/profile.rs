//! Profile of the signed-in identity.
//!
//! Profile and password changes are validated and acknowledged but never
//! touch the session; only login and logout change who is signed in.
//! Notification toggles are kept per browser session.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::ShellView;
use crate::filters;
use crate::flash::Flash;
use crate::forms::{
    FieldErrors, FieldSpec, FieldView, FormData, InputKind, MIN_PASSWORD_LENGTH, Validator,
    field_views,
};
use crate::middleware::RequireIdentity;
use crate::models::{Identity, session_keys};
use crate::state::AppState;

use super::{page, shell};

const PROFILE_PATH: &str = "/profile";

const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Full Name", InputKind::Text),
    FieldSpec::required("email", "Email Address", InputKind::Email),
];

const PASSWORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("current_password", "Current Password", InputKind::Password),
    FieldSpec::required("new_password", "New Password", InputKind::Password),
    FieldSpec::required("confirm_password", "Confirm New Password", InputKind::Password),
];

/// Notification toggles of one browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub weekly_digest: bool,
    pub inventory_alerts: bool,
    pub order_updates: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: false,
            weekly_digest: true,
            inventory_alerts: true,
            order_updates: true,
        }
    }
}

impl NotificationPreferences {
    /// Read from checkbox fields; an unchecked box is absent from the form.
    #[must_use]
    pub fn from_form(form: &FormData) -> Self {
        Self {
            email_notifications: form.checked("email_notifications"),
            push_notifications: form.checked("push_notifications"),
            weekly_digest: form.checked("weekly_digest"),
            inventory_alerts: form.checked("inventory_alerts"),
            order_updates: form.checked("order_updates"),
        }
    }

    /// Preferences stored in `session`, or the defaults.
    pub async fn load(session: &Session) -> Self {
        session
            .get::<Self>(session_keys::NOTIFICATION_PREFERENCES)
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Store in `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session
            .insert(session_keys::NOTIFICATION_PREFERENCES, self)
            .await
    }

    fn toggles(self) -> Vec<ToggleView> {
        vec![
            ToggleView::new(
                "email_notifications",
                "Email Notifications",
                "Receive notifications via email",
                self.email_notifications,
            ),
            ToggleView::new(
                "push_notifications",
                "Push Notifications",
                "Receive push notifications in the browser",
                self.push_notifications,
            ),
            ToggleView::new(
                "weekly_digest",
                "Weekly Digest",
                "Receive a weekly summary of activity",
                self.weekly_digest,
            ),
            ToggleView::new(
                "inventory_alerts",
                "Inventory Alerts",
                "Get notified when stock runs low",
                self.inventory_alerts,
            ),
            ToggleView::new(
                "order_updates",
                "Order Updates",
                "Get notified when orders change status",
                self.order_updates,
            ),
        ]
    }
}

/// One notification checkbox.
#[derive(Debug, Clone)]
pub struct ToggleView {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub checked: bool,
}

impl ToggleView {
    const fn new(
        name: &'static str,
        label: &'static str,
        description: &'static str,
        checked: bool,
    ) -> Self {
        Self {
            name,
            label,
            description,
            checked,
        }
    }
}

/// Profile page template.
#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub shell: ShellView,
    pub profile_fields: Vec<FieldView>,
    pub password_fields: Vec<FieldView>,
    pub notifications: Vec<ToggleView>,
}

/// Build the profile router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(PROFILE_PATH, get(profile_page).post(update_profile))
        .route("/profile/password", post(update_password))
        .route("/profile/notifications", post(update_notifications))
}

fn identity_form(identity: &Identity) -> FormData {
    FormData::new()
        .with("name", &identity.name)
        .with("email", &identity.email)
}

/// Validate the profile form.
fn check_profile(form: &FormData) -> Result<(), FieldErrors> {
    let mut v = Validator::new(form);
    v.required("name", "Full name");
    v.email("email");
    v.finish()
}

/// Why a password change was refused.
#[derive(Debug, PartialEq, Eq)]
enum PasswordRejection {
    Invalid(FieldErrors),
    Mismatch,
}

/// Validate the password form.
fn check_password(form: &FormData) -> Result<(), PasswordRejection> {
    let mut v = Validator::new(form);
    v.required("current_password", "Current password");
    v.min_length("new_password", "New password", MIN_PASSWORD_LENGTH);
    v.required("confirm_password", "Confirmation");
    v.finish().map_err(PasswordRejection::Invalid)?;

    if form.raw("new_password") != form.raw("confirm_password") {
        return Err(PasswordRejection::Mismatch);
    }
    Ok(())
}

struct ProfilePage<'a> {
    profile: &'a FormData,
    profile_errors: &'a FieldErrors,
    password_errors: &'a FieldErrors,
    flash: Option<Flash>,
}

async fn render(
    state: &AppState,
    session: &Session,
    identity: &Identity,
    view: ProfilePage<'_>,
    status: StatusCode,
) -> Response {
    let mut shell = shell(state, session, identity, PROFILE_PATH).await;
    if view.flash.is_some() {
        shell.flash = view.flash;
    }
    let template = ProfileTemplate {
        shell,
        profile_fields: field_views(PROFILE_FIELDS, view.profile, view.profile_errors),
        password_fields: field_views(PASSWORD_FIELDS, &FormData::new(), view.password_errors),
        notifications: NotificationPreferences::load(session).await.toggles(),
    };
    page(status, &template)
}

/// Profile page.
///
/// GET /profile
async fn profile_page(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let form = identity_form(&identity);
    let none = FieldErrors::default();
    render(
        &state,
        &session,
        &identity,
        ProfilePage {
            profile: &form,
            profile_errors: &none,
            password_errors: &none,
            flash: None,
        },
        StatusCode::OK,
    )
    .await
}

/// Acknowledge a profile edit.
///
/// POST /profile
#[instrument(skip_all)]
async fn update_profile(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<FormData>,
) -> Response {
    match check_profile(&form) {
        Ok(()) => {
            Flash::success("Profile updated", "Your profile has been updated successfully")
                .push(&session)
                .await;
            Redirect::to(PROFILE_PATH).into_response()
        }
        Err(errors) => {
            render(
                &state,
                &session,
                &identity,
                ProfilePage {
                    profile: &form,
                    profile_errors: &errors,
                    password_errors: &FieldErrors::default(),
                    flash: None,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            )
            .await
        }
    }
}

/// Acknowledge a password change.
///
/// POST /profile/password
#[instrument(skip_all)]
async fn update_password(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<FormData>,
) -> Response {
    let (password_errors, flash) = match check_password(&form) {
        Ok(()) => {
            Flash::success("Password updated", "Your password has been updated successfully")
                .push(&session)
                .await;
            return Redirect::to(PROFILE_PATH).into_response();
        }
        Err(PasswordRejection::Invalid(errors)) => (errors, None),
        Err(PasswordRejection::Mismatch) => (
            FieldErrors::default(),
            Some(Flash::error(
                "Passwords don't match",
                "New password and confirmation must match",
            )),
        ),
    };

    render(
        &state,
        &session,
        &identity,
        ProfilePage {
            profile: &identity_form(&identity),
            profile_errors: &FieldErrors::default(),
            password_errors: &password_errors,
            flash,
        },
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await
}

/// Save notification toggles for this browser session.
///
/// POST /profile/notifications
#[instrument(skip_all)]
async fn update_notifications(
    RequireIdentity(_identity): RequireIdentity,
    session: Session,
    Form(form): Form<FormData>,
) -> Redirect {
    let flash = match NotificationPreferences::from_form(&form).save(&session).await {
        Ok(()) => Flash::success(
            "Preferences saved",
            "Your notification preferences have been updated",
        ),
        Err(e) => {
            tracing::warn!(error = %e, "failed to store notification preferences");
            Flash::error("Error", "Your notification preferences could not be saved")
        }
    };
    flash.push(&session).await;
    Redirect::to(PROFILE_PATH)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn passwords(current: &str, new: &str, confirm: &str) -> FormData {
        FormData::new()
            .with("current_password", current)
            .with("new_password", new)
            .with("confirm_password", confirm)
    }

    #[test]
    fn test_password_change_accepted() {
        assert_eq!(
            check_password(&passwords("password", "new-secret", "new-secret")),
            Ok(())
        );
    }

    #[test]
    fn test_password_mismatch() {
        assert_eq!(
            check_password(&passwords("password", "new-secret", "new-secrets")),
            Err(PasswordRejection::Mismatch)
        );
    }

    #[test]
    fn test_password_rules() {
        let Err(PasswordRejection::Invalid(errors)) = check_password(&passwords("", "short", ""))
        else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("current_password"), Some("Current password is required"));
        assert_eq!(
            errors.get("new_password"),
            Some("New password must be at least 8 characters")
        );
        assert_eq!(errors.get("confirm_password"), Some("Confirmation is required"));
    }

    #[test]
    fn test_profile_requires_valid_email() {
        let form = FormData::new().with("name", "Admin User").with("email", "admin");
        let errors = check_profile(&form).unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_unchecked_boxes_turn_off() {
        let form = FormData::new().with("weekly_digest", "on");
        let prefs = NotificationPreferences::from_form(&form);
        assert!(prefs.weekly_digest);
        assert!(!prefs.email_notifications);
        assert!(!prefs.order_updates);
    }

    #[tokio::test]
    async fn test_preferences_persist_in_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        assert_eq!(
            NotificationPreferences::load(&session).await,
            NotificationPreferences::default()
        );

        let prefs = NotificationPreferences {
            push_notifications: true,
            ..NotificationPreferences::default()
        };
        prefs.save(&session).await.unwrap();
        assert_eq!(NotificationPreferences::load(&session).await, prefs);
    }
}
