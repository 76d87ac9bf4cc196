//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit a local run.
//!
//! - `IMS_HOST` - Bind address (default: 127.0.0.1)
//! - `IMS_PORT` - Listen port (default: 3001)
//! - `IMS_BASE_URL` - Public URL (default: `http://localhost:3001`); an
//!   `https://` URL turns on secure session cookies
//! - `IMS_LOGIN_DELAY_MS` - Artificial login round trip (default: 800)
//! - `IMS_PAGE_SIZE` - Record table page size, 1..=100 (default: 10)
//! - `IMS_SESSION_EXPIRY_HOURS` - Session inactivity expiry (default: 24)
//! - `IMS_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)
//!
//! ## Optional (TLS)
//! - `IMS_TLS_CERT` - PEM-encoded certificate chain
//! - `IMS_TLS_KEY` - PEM-encoded private key

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::components::record_table::MAX_PAGE_SIZE;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_LOGIN_DELAY_MS: u64 = 800;
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_SESSION_EXPIRY_HOURS: u64 = 24;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the console
    pub base_url: String,
    /// Artificial delay applied to every login attempt
    pub login_delay: Duration,
    /// Default number of rows per record table page
    pub page_size: usize,
    /// Session inactivity expiry
    pub session_expiry: Duration,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            page_size: DEFAULT_PAGE_SIZE,
            session_expiry: Duration::from_secs(DEFAULT_SESSION_EXPIRY_HOURS * 60 * 60),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
            tls: None,
        }
    }
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_vars(vars: &impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        match (vars("IMS_TLS_CERT"), vars("IMS_TLS_KEY")) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "IMS_TLS_*".to_string(),
                "Both IMS_TLS_CERT and IMS_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or(&vars, "IMS_HOST", defaults.host)?;
        let port = parse_or(&vars, "IMS_PORT", defaults.port)?;
        let base_url = vars("IMS_BASE_URL").unwrap_or(defaults.base_url);
        let login_delay =
            Duration::from_millis(parse_or(&vars, "IMS_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)?);

        let page_size = parse_or(&vars, "IMS_PAGE_SIZE", defaults.page_size)?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidEnvVar(
                "IMS_PAGE_SIZE".to_string(),
                format!("must be between 1 and {MAX_PAGE_SIZE} (got {page_size})"),
            ));
        }

        let expiry_hours: u64 =
            parse_or(&vars, "IMS_SESSION_EXPIRY_HOURS", DEFAULT_SESSION_EXPIRY_HOURS)?;
        let session_expiry = expiry_hours
            .checked_mul(60 * 60)
            .filter(|_| expiry_hours > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "IMS_SESSION_EXPIRY_HOURS".to_string(),
                    format!("must be a positive number of hours (got {expiry_hours})"),
                )
            })?;
        let log_json = vars("IMS_LOG_JSON").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Ok(Self {
            host,
            port,
            base_url,
            login_delay,
            page_size,
            session_expiry,
            log_json,
            sentry_dsn: vars("SENTRY_DSN"),
            sentry_environment: vars("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or(&vars, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: parse_or(
                &vars,
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
            tls: TlsConfig::from_vars(&vars)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the console is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, falling back to a default if absent.
fn parse_or<T>(
    vars: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match vars(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AdminConfig::from_vars(lookup(&[])).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.login_delay, Duration::from_millis(800));
        assert_eq!(config.page_size, 10);
        assert!(!config.is_secure());
        assert!(config.tls.is_none());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = AdminConfig::from_vars(lookup(&[
            ("IMS_HOST", "0.0.0.0"),
            ("IMS_PORT", "8080"),
            ("IMS_BASE_URL", "https://ims.internal"),
            ("IMS_LOGIN_DELAY_MS", "0"),
            ("IMS_PAGE_SIZE", "25"),
            ("IMS_LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.login_delay, Duration::ZERO);
        assert_eq!(config.page_size, 25);
        assert!(config.is_secure());
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AdminConfig::from_vars(lookup(&[("IMS_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("IMS_PORT"));
    }

    #[test]
    fn test_page_size_out_of_range_is_rejected() {
        assert!(AdminConfig::from_vars(lookup(&[("IMS_PAGE_SIZE", "0")])).is_err());
        assert!(AdminConfig::from_vars(lookup(&[("IMS_PAGE_SIZE", "1000")])).is_err());
    }

    #[test]
    fn test_session_expiry_must_be_positive_and_fit() {
        assert!(AdminConfig::from_vars(lookup(&[("IMS_SESSION_EXPIRY_HOURS", "0")])).is_err());
        assert!(
            AdminConfig::from_vars(lookup(&[(
                "IMS_SESSION_EXPIRY_HOURS",
                "18446744073709551615"
            )]))
            .is_err()
        );

        let config = AdminConfig::from_vars(lookup(&[("IMS_SESSION_EXPIRY_HOURS", "2")])).unwrap();
        assert_eq!(config.session_expiry, Duration::from_secs(7_200));
    }

    #[test]
    fn test_tls_requires_both_halves() {
        assert!(AdminConfig::from_vars(lookup(&[("IMS_TLS_CERT", "cert")])).is_err());

        let config =
            AdminConfig::from_vars(lookup(&[("IMS_TLS_CERT", "cert"), ("IMS_TLS_KEY", "key")]))
                .unwrap();
        assert!(config.tls.is_some());
    }

    #[test]
    fn test_tls_config_debug_redacts_key() {
        let tls = TlsConfig {
            cert_pem: "-----BEGIN CERTIFICATE-----".to_string(),
            key_pem: SecretString::from("super_secret_private_key"),
        };

        let debug_output = format!("{tls:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_private_key"));
    }
}
