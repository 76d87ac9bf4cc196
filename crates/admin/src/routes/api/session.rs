//! Session API handlers.

use axum::{Json, Router, extract::State, routing::get};
use tower_sessions::Session;

use crate::middleware::RequireIdentity;
use crate::models::Identity;
use crate::services::SessionState;
use crate::state::AppState;

/// Build the session API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(session_state))
        .route("/api/me", get(me))
}

/// The restored session, resolving flag included.
///
/// GET /api/session
pub async fn session_state(State(state): State<AppState>, session: Session) -> Json<SessionState> {
    Json(state.current_session(&session).await)
}

/// The signed-in identity.
///
/// GET /api/me
pub async fn me(RequireIdentity(identity): RequireIdentity) -> Json<Identity> {
    Json(identity)
}
