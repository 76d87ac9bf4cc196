//! HTTP middleware and extractors.
//!
//! # Request Flow
//!
//! 1. Sentry layers (outermost, capture errors and transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Session layer (cookie-bound `tower-sessions` session)
//! 4. Guard extractors in handlers ([`auth`]), deciding per request via
//!    [`guard::evaluate`]

pub mod auth;
pub mod guard;
pub mod session;

pub use auth::{GuardRejection, OptionalIdentity, RequireAdmin, RequireIdentity, RequireManager};
pub use guard::{GuardDecision, LANDING_PATH, LOGIN_PATH, evaluate};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
