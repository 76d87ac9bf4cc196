//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Auth (public)
//! GET  /auth/login                  - Login page
//! POST /auth/login                  - Check credentials
//! POST /auth/logout                 - Logout
//!
//! # Dashboard
//! GET  /                            - Totals, low stock, recent orders
//!
//! # Record screens (inventory, orders, warehouses, customers, shipments)
//! GET  /{kind}                      - Table (q, sort, dir, page, per_page)
//! GET  /{kind}/new                  - Create form          (admin, manager)
//! POST /{kind}                      - Create               (admin, manager)
//! GET  /{kind}/{id}/edit            - Edit form            (admin, manager)
//! POST /{kind}/{id}                 - Update               (admin, manager)
//! POST /{kind}/{id}/delete          - Delete               (admin, manager)
//!
//! # User administration (admin only)
//! GET  /users                       - Account cards
//! GET  /users/new, POST /users      - Create
//! GET  /users/{id}/edit, POST /users/{id} - Update
//! POST /users/{id}/delete           - Delete (not your own account)
//!
//! # Everything else
//! GET  /reports                     - Monthly figures, value by category
//! GET  /settings, POST /settings    - General settings
//! GET  /profile                     - Profile, password, notifications
//! POST /profile, /profile/password, /profile/notifications
//! GET  /api/session                 - Session state as JSON
//! GET  /api/me                      - Signed-in identity as JSON (401 when signed out)
//! *                                 - Not found page (404)
//! ```

pub mod api;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod inventory;
pub mod orders;
pub mod profile;
pub mod records;
pub mod reports;
pub mod settings;
pub mod shipments;
pub mod users;
pub mod warehouses;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::Session;
use tracing::Span;

use crate::components::ShellView;
use crate::filters;
use crate::flash::Flash;
use crate::middleware::{OptionalIdentity, create_session_layer};
use crate::models::Identity;
use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "crates/admin/static";

/// All page and API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(records::router::<inventory::InventoryScreen>())
        .merge(records::router::<orders::OrdersScreen>())
        .merge(records::router::<warehouses::WarehousesScreen>())
        .merge(records::router::<customers::CustomersScreen>())
        .merge(records::router::<shipments::ShipmentsScreen>())
        .merge(users::router())
        .merge(reports::router())
        .merge(settings::router())
        .merge(profile::router())
        .merge(api::router())
}

/// The complete application: routes, health check, static files, the
/// not-found fallback, sessions and request tracing.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Page chrome for `identity` on `path`, consuming any pending flash.
pub async fn shell(
    state: &AppState,
    session: &Session,
    identity: &Identity,
    path: &str,
) -> ShellView {
    ShellView::new(
        identity,
        path,
        Flash::take(session).await,
        state.company_name(),
    )
}

/// Render a template into a response with `status`.
pub fn page(status: StatusCode, template: &impl Template) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Not-found page.
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    signed_in: bool,
}

/// Fallback for unknown paths.
async fn not_found(OptionalIdentity(identity): OptionalIdentity) -> Response {
    page(
        StatusCode::NOT_FOUND,
        &NotFoundTemplate {
            signed_in: identity.is_some(),
        },
    )
}
