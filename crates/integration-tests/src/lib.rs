//! Integration tests for the inventory management console.
//!
//! Tests drive the fully assembled router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is needed.
//!
//! ```bash
//! cargo test -p ims-integration-tests
//! ```
//!
//! [`TestClient`] plays the browser: it keeps the session cookie between
//! requests and never follows redirects, so tests can assert on them.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use tower::ServiceExt;

use ims_admin::config::AdminConfig;
use ims_admin::routes;
use ims_admin::state::AppState;

/// Password shared by the built-in accounts.
pub const DEMO_PASSWORD: &str = "password";

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub retry_after: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Assert a 303 redirect to `path`.
    #[track_caller]
    pub fn assert_redirect(&self, path: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location.as_deref(), Some(path));
    }
}

/// One browser talking to one console instance.
#[derive(Clone)]
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// A console with no login delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_login_delay(Duration::ZERO)
    }

    /// A console whose logins take `delay`.
    #[must_use]
    pub fn with_login_delay(delay: Duration) -> Self {
        let config = AdminConfig {
            login_delay: delay,
            ..AdminConfig::default()
        };
        Self {
            app: routes::app(AppState::new(config)),
            cookie: None,
        }
    }

    /// A second browser against the same console, without cookies.
    #[must_use]
    pub fn new_browser(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Whether the console has handed out a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// GET `path`.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    /// POST `fields` to `path` as a form.
    pub async fn post(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(Method::POST, path, Some(body)).await
    }

    /// Sign in and follow the redirect to the dashboard.
    pub async fn login(&mut self, email: &str) -> TestResponse {
        let response = self
            .post("/auth/login", &[("email", email), ("password", DEMO_PASSWORD)])
            .await;
        response.assert_redirect("/");
        self.get("/").await
    }

    #[allow(clippy::unwrap_used)]
    async fn send(&mut self, method: Method, path: &str, form: Option<String>) -> TestResponse {
        let mut request = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match form {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let header_text = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .map(|v| v.to_str().unwrap().to_string())
        };
        let status = response.status();
        let location = header_text(header::LOCATION);
        let retry_after = header_text(header::RETRY_AFTER);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            retry_after,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
