//! Authentication extractors for route handlers.
//!
//! Each extractor restores the browser session, runs the route guard and
//! either yields the signed-in [`Identity`] or rejects the request:
//!
//! | Decision            | HTML screens             | `/api/` paths |
//! |---------------------|--------------------------|---------------|
//! | resolving           | 200 waiting page         | 503           |
//! | signed out          | 303 to `/auth/login`     | 401           |
//! | role not allowed    | 303 to `/`               | 403           |

use askama::Template;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use ims_core::Role;

use super::guard::{GuardDecision, LANDING_PATH, LOGIN_PATH, evaluate};
use crate::error::set_sentry_user;
use crate::models::Identity;
use crate::state::AppState;

/// Roles allowed to create, edit and delete records.
pub const RECORD_MANAGERS: &[Role] = &[Role::Admin, Role::Manager];

/// Roles allowed to administer user accounts.
pub const ADMINS: &[Role] = &[Role::Admin];

/// Neutral page shown while the session settles; reloads itself.
#[derive(Template)]
#[template(path = "auth/waiting.html")]
struct WaitingTemplate {
    refresh_to: String,
}

/// Why a guarded request was not let through.
#[derive(Debug)]
pub enum GuardRejection {
    /// The session is still settling.
    Resolving { path: String, is_api: bool },
    /// Nobody is signed in.
    RedirectToLogin,
    /// Signed in without a permitted role.
    RedirectToLanding,
    /// API request without a signed-in identity.
    Unauthorized,
    /// API request from a role that is not permitted.
    Forbidden,
    /// The session layer is not installed.
    MissingSession,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Resolving { is_api: true, .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, [(header::RETRY_AFTER, "1")]).into_response()
            }
            Self::Resolving { path, .. } => {
                let page = WaitingTemplate { refresh_to: path }.render().unwrap_or_else(|e| {
                    tracing::error!("Template render error: {}", e);
                    "Loading...".to_string()
                });
                ([(header::CACHE_CONTROL, "no-store")], Html(page)).into_response()
            }
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::RedirectToLanding => Redirect::to(LANDING_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => StatusCode::FORBIDDEN.into_response(),
            Self::MissingSession => {
                tracing::error!("session layer missing from router");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Run the route guard for this request.
async fn guard(
    parts: &Parts,
    state: &AppState,
    allowed: Option<&[Role]>,
) -> Result<Identity, GuardRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(GuardRejection::MissingSession)?;
    let is_api = parts.uri.path().starts_with("/api/");

    match evaluate(&state.current_session(session).await, allowed) {
        GuardDecision::Render(identity) => {
            set_sentry_user(&identity);
            Ok(identity)
        }
        GuardDecision::Resolving => Err(GuardRejection::Resolving {
            path: parts
                .uri
                .path_and_query()
                .map_or_else(|| LANDING_PATH.to_string(), ToString::to_string),
            is_api,
        }),
        GuardDecision::RedirectToLogin if is_api => Err(GuardRejection::Unauthorized),
        GuardDecision::RedirectToLogin => Err(GuardRejection::RedirectToLogin),
        GuardDecision::RedirectToLanding if is_api => Err(GuardRejection::Forbidden),
        GuardDecision::RedirectToLanding => Err(GuardRejection::RedirectToLanding),
    }
}

/// Extractor that requires a signed-in identity of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireIdentity(identity): RequireIdentity) -> String {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
pub struct RequireIdentity(pub Identity);

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guard(parts, state, None).await.map(Self)
    }
}

/// Extractor that requires an admin or a manager.
pub struct RequireManager(pub Identity);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guard(parts, state, Some(RECORD_MANAGERS)).await.map(Self)
    }
}

/// Extractor that requires an admin.
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = GuardRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guard(parts, state, Some(ADMINS)).await.map(Self)
    }
}

/// Extractor that yields the settled identity, if any, without rejecting.
///
/// A session that is still resolving counts as signed out.
pub struct OptionalIdentity(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<Session>() {
            Some(session) => state.current_session(session).await.identity,
            None => None,
        };
        Ok(Self(identity))
    }
}
