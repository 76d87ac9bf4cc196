//! Session middleware configuration.
//!
//! Sessions live in a process-local `MemoryStore`; restarting the console
//! signs everybody out. The cookie is `SameSite=Strict` and `HttpOnly`, and
//! expires after a period of inactivity.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ims_session";

/// Create the session layer.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    let inactivity = tower_sessions::cookie::time::Duration::seconds(
        i64::try_from(config.session_expiry.as_secs()).unwrap_or(i64::MAX),
    );

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(inactivity))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
