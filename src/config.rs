use axum::http::HeaderValue;
use std::env;

use crate::types::{BarInterval, HistoryRange};

/// Default origin of the frontend dev server.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Default Yahoo Finance chart API host.
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Origins the HTTP layer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin, without credentials. Only set by an explicit `*`.
    Any,
    /// Listed origins, with credentials.
    List(Vec<String>),
}

/// Cross-origin settings for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: AllowedOrigins,
}

impl CorsConfig {
    /// Whether every origin is allowed (no credentials in that case).
    pub fn allows_any(&self) -> bool {
        matches!(self.allowed_origins, AllowedOrigins::Any)
    }

    /// Build from the raw `CORS_ALLOWED_ORIGINS` value. Missing, blank or
    /// unusable values keep the default origin.
    pub fn from_env_value(raw: Option<&str>) -> Self {
        raw.and_then(parse_origins)
            .map(|allowed_origins| Self { allowed_origins })
            .unwrap_or_default()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: AllowedOrigins::List(vec![DEFAULT_CORS_ORIGIN.to_string()]),
        }
    }
}

/// Price history fetch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Chart API host, without trailing slash.
    pub base_url: String,
    /// Lookback range for each request.
    pub range: HistoryRange,
    /// Bar size.
    pub interval: BarInterval,
    /// HTTP client timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            range: HistoryRange::SixMonths,
            interval: BarInterval::OneDay,
            timeout_secs: 30,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// CORS settings.
    pub cors: CorsConfig,
    /// History provider settings.
    pub history: HistoryConfig,
}

/// Parse a comma separated origin list.
///
/// `*` anywhere means any origin. Entries that are not valid header values
/// are dropped. Returns `None` when nothing usable is left.
pub fn parse_origins(raw: &str) -> Option<AllowedOrigins> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Some(AllowedOrigins::Any);
    }

    let origins: Vec<String> = origins
        .into_iter()
        .filter(|o| HeaderValue::from_str(o).is_ok())
        .collect();

    if origins.is_empty() {
        None
    } else {
        Some(AllowedOrigins::List(origins))
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = HistoryConfig::default();

        let cors = CorsConfig::from_env_value(env::var("CORS_ALLOWED_ORIGINS").ok().as_deref());

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors,
            history: HistoryConfig {
                base_url: env::var("YAHOO_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.base_url),
                range: env::var("HISTORY_RANGE")
                    .ok()
                    .and_then(|v| HistoryRange::from_str(&v))
                    .unwrap_or(defaults.range),
                interval: env::var("HISTORY_INTERVAL")
                    .ok()
                    .and_then(|v| BarInterval::from_str(&v))
                    .unwrap_or(defaults.interval),
                timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timeout_secs),
            },
        }
    }

    /// Socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors: CorsConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}
