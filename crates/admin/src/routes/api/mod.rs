//! JSON API route handlers.
//!
//! Guarded endpoints under `/api/` answer with status codes instead of
//! redirects: 401 when signed out, 403 for a role that is not allowed and
//! 503 while the session is still resolving.

pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(session::router())
}
