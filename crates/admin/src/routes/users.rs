//! User administration (admin only).
//!
//! Accounts managed here live in their own repository, seeded from the
//! login directory. Changes do not affect who can sign in.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use tower_sessions::Session;
use tracing::instrument;

use ims_core::{Role, UserId};

use crate::components::ShellView;
use crate::db::RecordRepository;
use crate::error::AppError;
use crate::filters;
use crate::flash::Flash;
use crate::forms::{
    FieldErrors, FieldSpec, FormData, InputKind, MIN_PASSWORD_LENGTH, Validator, choice_options,
    field_views,
};
use crate::middleware::RequireAdmin;
use crate::models::{Identity, UserAccount};
use crate::state::AppState;

use super::records::{RecordFormTemplate, conflict_errors};
use super::{page, shell};

const USERS_PATH: &str = "/users";

const CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Full Name", InputKind::Text),
    FieldSpec::required("email", "Email", InputKind::Email),
    FieldSpec::required("password", "Password", InputKind::Password),
    FieldSpec::required("role", "Role", InputKind::Select(choice_options::<Role>)),
];

const EDIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Full Name", InputKind::Text),
    FieldSpec::required("email", "Email", InputKind::Email),
    FieldSpec::optional("password", "Password (leave blank to keep current)", InputKind::Password),
    FieldSpec::required("role", "Role", InputKind::Select(choice_options::<Role>)),
];

/// One account card.
#[derive(Debug, Clone)]
pub struct UserCard {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub role_class: &'static str,
    pub avatar: String,
    /// The card belongs to the signed-in identity; it cannot be deleted.
    pub is_current: bool,
}

impl UserCard {
    fn new(account: &UserAccount, identity: &Identity) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role.label(),
            role_class: match account.role {
                Role::Admin => "badge badge-danger",
                Role::Manager => "badge badge-info",
                Role::User => "badge badge-success",
            },
            avatar: account.avatar_url(),
            is_current: account.is_identity(identity),
        }
    }
}

/// Account cards page.
#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub shell: ShellView,
    pub users: Vec<UserCard>,
}

/// Build the user administration router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(USERS_PATH, get(index).post(create))
        .route("/users/new", get(new_form))
        .route("/users/{id}", post(update))
        .route("/users/{id}/edit", get(edit_form))
        .route("/users/{id}/delete", post(delete))
}

/// Validate the user form.
///
/// With `existing`, a blank password keeps the current one.
fn parse(form: &FormData, existing: Option<&UserAccount>) -> Result<UserAccount, FieldErrors> {
    let mut v = Validator::new(form);
    let name = v.required("name", "Full name");
    let email = v.email("email");
    let role = v.choice::<Role>("role", "Role");
    let password = match existing {
        Some(account) if form.value("password").is_empty() => Some(account.password.clone()),
        _ => v
            .min_length("password", "Password", MIN_PASSWORD_LENGTH)
            .map(SecretString::from),
    };

    let (Some(name), Some(email), Some(role), Some(password)) = (name, email, role, password)
    else {
        return Err(v.into_errors());
    };

    Ok(UserAccount {
        id: existing.map_or_else(|| UserId::new(""), |a| a.id.clone()),
        name,
        email: email.into_inner(),
        role,
        avatar: existing.and_then(|a| a.avatar.clone()),
        password,
    })
}

fn form_data(account: &UserAccount) -> FormData {
    FormData::new()
        .with("name", &account.name)
        .with("email", &account.email)
        .with("role", account.role.as_str())
}

async fn form_page(
    state: &AppState,
    session: &Session,
    identity: &Identity,
    editing: Option<&UserId>,
    form: &FormData,
    errors: &FieldErrors,
    status: StatusCode,
) -> Response {
    let (heading, action, submit_label, fields) = match editing {
        Some(id) => (
            "Edit User",
            format!("{USERS_PATH}/{}", urlencoding::encode(id.as_str())),
            "Save Changes",
            EDIT_FIELDS,
        ),
        None => ("Add New User", USERS_PATH.to_string(), "Create", CREATE_FIELDS),
    };
    let template = RecordFormTemplate {
        shell: shell(state, session, identity, USERS_PATH).await,
        title: "User Management",
        heading: heading.to_string(),
        action,
        submit_label,
        cancel_href: USERS_PATH,
        fields: field_views(fields, form, errors),
        has_errors: !errors.is_empty(),
    };
    page(status, &template)
}

/// Account cards.
///
/// GET /users
#[instrument(skip_all)]
async fn index(
    RequireAdmin(identity): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let users = state
        .users()
        .list()?
        .iter()
        .map(|account| UserCard::new(account, &identity))
        .collect();

    let template = UsersIndexTemplate {
        shell: shell(&state, &session, &identity, USERS_PATH).await,
        users,
    };
    Ok(page(StatusCode::OK, &template))
}

/// Empty create form.
///
/// GET /users/new
async fn new_form(
    RequireAdmin(identity): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let form = FormData::new().with("role", Role::User.as_str());
    form_page(
        &state,
        &session,
        &identity,
        None,
        &form,
        &FieldErrors::default(),
        StatusCode::OK,
    )
    .await
}

/// Create an account.
///
/// POST /users
#[instrument(skip_all)]
async fn create(
    RequireAdmin(identity): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<FormData>,
) -> Result<Response, AppError> {
    let errors = match parse(&form, None) {
        Ok(draft) => match state.users().create(draft) {
            Ok(created) => {
                tracing::info!(user_id = %created.id, role = %created.role, "user account created");
                Flash::success("Success", "User added successfully")
                    .push(&session)
                    .await;
                return Ok(Redirect::to(USERS_PATH).into_response());
            }
            Err(e) => conflict_errors(e)?,
        },
        Err(errors) => errors,
    };

    Ok(form_page(
        &state,
        &session,
        &identity,
        None,
        &form,
        &errors,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await)
}

/// Prefilled edit form.
///
/// GET /users/{id}/edit
async fn edit_form(
    RequireAdmin(identity): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = UserId::from(id);
    let account = state.users().get(&id)?;

    Ok(form_page(
        &state,
        &session,
        &identity,
        Some(&id),
        &form_data(&account),
        &FieldErrors::default(),
        StatusCode::OK,
    )
    .await)
}

/// Update an account.
///
/// POST /users/{id}
#[instrument(skip_all)]
async fn update(
    RequireAdmin(identity): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> Result<Response, AppError> {
    let id = UserId::from(id);
    let existing = state.users().get(&id)?;

    let errors = match parse(&form, Some(&existing)) {
        Ok(account) => match state.users().update(&id, account) {
            Ok(_) => {
                Flash::success("Success", "User updated successfully")
                    .push(&session)
                    .await;
                return Ok(Redirect::to(USERS_PATH).into_response());
            }
            Err(e) => conflict_errors(e)?,
        },
        Err(errors) => errors,
    };

    Ok(form_page(
        &state,
        &session,
        &identity,
        Some(&id),
        &form,
        &errors,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await)
}

/// Delete an account other than your own.
///
/// POST /users/{id}/delete
#[instrument(skip_all)]
async fn delete(
    RequireAdmin(identity): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = UserId::from(id);
    if id == identity.id {
        tracing::warn!(user_id = %id, "refusing to delete the signed-in account");
        Flash::error("Error", "You cannot delete your own account")
            .push(&session)
            .await;
        return Ok(Redirect::to(USERS_PATH));
    }

    state.users().delete(&id)?;
    Flash::success("Success", "User deleted successfully")
        .push(&session)
        .await;
    Ok(Redirect::to(USERS_PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::db::fixtures;
    use crate::services::StaticDirectory;

    fn accounts() -> Vec<UserAccount> {
        fixtures::user_accounts(&StaticDirectory::builtin())
    }

    fn form(password: &str) -> FormData {
        FormData::new()
            .with("name", "Sam Carter")
            .with("email", "sam@example.com")
            .with("password", password)
            .with("role", "manager")
    }

    #[test]
    fn test_create_requires_password() {
        let errors = parse(&form(""), None).unwrap_err();
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = parse(&form("short"), None).unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_edit_with_blank_password_keeps_current() {
        let existing = accounts().remove(2);
        let updated = parse(&form(""), Some(&existing)).unwrap();
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.role, Role::Manager);
        assert_eq!(updated.password.expose_secret(), "password");
        assert_eq!(updated.avatar, existing.avatar);
    }

    #[test]
    fn test_edit_with_new_password_replaces_it() {
        let existing = accounts().remove(2);
        let updated = parse(&form("correct horse"), Some(&existing)).unwrap();
        assert_eq!(updated.password.expose_secret(), "correct horse");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let errors = parse(&form("password1").with("role", "owner"), None).unwrap_err();
        assert_eq!(errors.get("role"), Some("Select a valid role"));
    }

    #[test]
    fn test_cards_mark_current_identity() {
        let admin = StaticDirectory::builtin().entries()[0].identity.clone();
        let cards: Vec<_> = accounts().iter().map(|a| UserCard::new(a, &admin)).collect();
        assert!(cards[0].is_current);
        assert!(!cards[1].is_current);
        assert_eq!(cards[0].role, "Admin");
        assert_eq!(cards[1].role_class, "badge badge-info");
    }

    #[test]
    fn test_edit_form_never_contains_password() {
        let data = form_data(&accounts()[0]);
        assert_eq!(data.value("password"), "");
        assert_eq!(data.value("role"), "admin");
    }
}
