//! Configuration module for the HR proxy.
//!
//! All configuration is loaded from environment variables. The ERP connection
//! settings are required; everything else has a sensible default.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const ODOO_URL: &str = "ODOO_URL";
pub const ODOO_DATABASE: &str = "ODOO_DATABASE";
pub const ODOO_USERNAME: &str = "ODOO_USERNAME";
pub const ODOO_PASSWORD: &str = "ODOO_PASSWORD";
pub const ODOO_TIMEOUT_MS: &str = "ODOO_TIMEOUT_MS";
pub const ODOO_SESSION_TTL_SECS: &str = "ODOO_SESSION_TTL_SECS";
pub const HR_BIND_ADDR: &str = "HR_BIND_ADDR";
pub const HR_LOG_LEVEL: &str = "HR_LOG_LEVEL";
pub const HR_API_PSK: &str = "HR_API_PSK";
pub const HR_LIST_FAILURE_MODE: &str = "HR_LIST_FAILURE_MODE";
pub const HR_API_BASE_URL: &str = "HR_API_BASE_URL";
pub const HR_API_TIMEOUT_MS: &str = "HR_API_TIMEOUT_MS";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SESSION_TTL_SECS: u64 = 300;

/// Configuration errors, raised before any network call is made.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Connection settings for the remote ERP.
#[derive(Clone)]
pub struct OdooConfig {
    /// Base URL, without the `/xmlrpc/2/...` suffix
    pub url: String,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Per-request transport timeout; `None` leaves the transport default
    pub timeout: Option<Duration>,
    /// How long an authenticated uid is reused; zero re-authenticates on every call
    pub session_ttl: Duration,
}

impl std::fmt::Debug for OdooConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdooConfig")
            .field("url", &self.url)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

/// What list endpoints report when the remote call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFailureMode {
    /// Empty data plus a `degraded` flag and the error message
    #[default]
    Tagged,
    /// Empty data and nothing else
    Compat,
}

impl ListFailureMode {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tagged" => Ok(ListFailureMode::Tagged),
            "compat" => Ok(ListFailureMode::Compat),
            other => Err(ConfigError::Invalid {
                name: HR_LIST_FAILURE_MODE,
                reason: format!("expected `tagged` or `compat`, got `{}`", other),
            }),
        }
    }
}

/// Application configuration for the proxy server.
#[derive(Debug, Clone)]
pub struct Config {
    pub odoo: OdooConfig,
    /// Pre-shared key guarding `/api`; disabled when absent
    pub api_psk: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub list_failure_mode: ListFailureMode,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as missing. All missing required variables are
    /// reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = [ODOO_URL, ODOO_DATABASE, ODOO_USERNAME, ODOO_PASSWORD];
        let missing: Vec<&'static str> = required
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let odoo = OdooConfig {
            url: get(ODOO_URL)
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            database: get(ODOO_DATABASE).unwrap_or_default(),
            username: get(ODOO_USERNAME).unwrap_or_default(),
            password: get(ODOO_PASSWORD).unwrap_or_default(),
            timeout: parse_opt_u64(ODOO_TIMEOUT_MS, get(ODOO_TIMEOUT_MS))?
                .map(Duration::from_millis),
            session_ttl: Duration::from_secs(parse_u64(
                ODOO_SESSION_TTL_SECS,
                get(ODOO_SESSION_TTL_SECS),
                DEFAULT_SESSION_TTL_SECS,
            )?),
        };

        let bind_addr = get(HR_BIND_ADDR)
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: HR_BIND_ADDR,
                reason: e.to_string(),
            })?;

        let list_failure_mode = match get(HR_LIST_FAILURE_MODE) {
            Some(raw) => ListFailureMode::parse(&raw)?,
            None => ListFailureMode::default(),
        };

        Ok(Self {
            odoo,
            api_psk: get(HR_API_PSK),
            bind_addr,
            log_level: get(HR_LOG_LEVEL).unwrap_or_else(|| "info".to_string()),
            list_failure_mode,
        })
    }
}

/// Settings for the client-side facade.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the proxy, e.g. `http://localhost:8080/api/odoo`
    pub base_url: String,
    pub timeout: Duration,
    /// Sent as `x-api-key` when the proxy is guarded
    pub api_key: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            api_key: None,
        }
    }

    /// Read `HR_API_BASE_URL`, `HR_API_TIMEOUT_MS` and `HR_API_PSK`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(HR_API_BASE_URL).ok_or(ConfigError::Missing(vec![HR_API_BASE_URL]))?;
        let timeout_ms = parse_u64(HR_API_TIMEOUT_MS, get(HR_API_TIMEOUT_MS), DEFAULT_TIMEOUT_MS)?;

        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            api_key: get(HR_API_PSK),
        })
    }
}

fn parse_u64(name: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    Ok(parse_opt_u64(name, raw)?.unwrap_or(default))
}

fn parse_opt_u64(name: &'static str, raw: Option<String>) -> Result<Option<u64>, ConfigError> {
    raw.map(|raw| {
        raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("`{}` is not a non-negative integer", raw),
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            (ODOO_URL, "http://localhost:8069/"),
            (ODOO_DATABASE, "odoo-db"),
            (ODOO_USERNAME, "admin@example.com"),
            (ODOO_PASSWORD, "secret"),
        ]
    }

    #[test]
    fn test_default_config() {
        let config = Config::from_lookup(lookup(&required())).unwrap();

        assert_eq!(config.odoo.url, "http://localhost:8069");
        assert_eq!(config.odoo.database, "odoo-db");
        assert_eq!(config.odoo.timeout, None);
        assert_eq!(config.odoo.session_ttl, Duration::from_secs(300));
        assert!(config.api_psk.is_none());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.list_failure_mode, ListFailureMode::Tagged);
    }

    #[test]
    fn test_missing_variables_are_enumerated() {
        let err = Config::from_lookup(lookup(&[(ODOO_URL, "http://x"), (ODOO_PASSWORD, "")]))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Missing(vec![ODOO_DATABASE, ODOO_USERNAME, ODOO_PASSWORD])
        );
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: ODOO_DATABASE, ODOO_USERNAME, ODOO_PASSWORD"
        );
    }

    #[test]
    fn test_optional_overrides() {
        let mut pairs = required();
        pairs.extend([
            (ODOO_SESSION_TTL_SECS, "0"),
            (HR_LIST_FAILURE_MODE, "Compat"),
            (HR_API_PSK, "k"),
            (HR_BIND_ADDR, "0.0.0.0:9000"),
            (ODOO_TIMEOUT_MS, "4000"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.odoo.timeout, Some(Duration::from_millis(4000)));

        assert!(config.odoo.session_ttl.is_zero());
        assert_eq!(config.list_failure_mode, ListFailureMode::Compat);
        assert_eq!(config.api_psk.as_deref(), Some("k"));
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn test_invalid_timeout() {
        let mut pairs = required();
        pairs.push((ODOO_TIMEOUT_MS, "soon"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: ODOO_TIMEOUT_MS, .. }));
    }

    #[test]
    fn test_password_is_not_debug_printed() {
        let config = Config::from_lookup(lookup(&required())).unwrap();
        let printed = format!("{:?}", config.odoo);
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_client_config() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec![HR_API_BASE_URL]));

        let config = ClientConfig::from_lookup(lookup(&[
            (HR_API_BASE_URL, "http://localhost:8080/api/odoo"),
            (HR_API_TIMEOUT_MS, "2500"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert!(config.api_key.is_none());
    }
}
