//! Sign-in and sign-out.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user};
use crate::filters;
use crate::flash::Flash;
use crate::middleware::{LANDING_PATH, LOGIN_PATH, OptionalIdentity};
use crate::state::AppState;

use super::page;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    flash: Option<Flash>,
}

/// Submitted credentials.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(OptionalIdentity(identity): OptionalIdentity, session: Session) -> Response {
    if identity.is_some() {
        return Redirect::to(LANDING_PATH).into_response();
    }
    page(
        StatusCode::OK,
        &LoginPageTemplate {
            flash: Flash::take(&session).await,
        },
    )
}

/// Check credentials and sign in.
///
/// While the check is in flight, other requests from the same browser see
/// the session as resolving.
///
/// POST /auth/login
#[instrument(skip_all, fields(email = %form.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    // A fresh session has no id until it is saved.
    session
        .save()
        .await
        .map_err(|e| AppError::Internal(format!("failed to start session: {e}")))?;
    let key = session
        .id()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::Internal("session has no id".to_string()))?;

    let signed_in = {
        let _pending = state.pending_logins().begin(key);
        state
            .session_store(session.clone())
            .login(&form.email, &form.password)
            .await
    };

    if signed_in {
        Flash::success(
            "Login successful",
            "Welcome to the Inventory Management System",
        )
        .push(&session)
        .await;
        Ok(Redirect::to(LANDING_PATH))
    } else {
        Flash::error("Login failed", "Invalid email or password")
            .push(&session)
            .await;
        Ok(Redirect::to(LOGIN_PATH))
    }
}

/// Sign out.
///
/// POST /auth/logout
async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    state.session_store(session).logout().await;
    clear_sentry_user();
    Redirect::to(LOGIN_PATH)
}
