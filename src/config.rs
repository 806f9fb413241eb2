// src/config.rs

use std::{env, fmt, net::SocketAddr, time::Duration};

use url::Url;

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound for a client supplied page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Number of page links rendered on each side of the current page.
pub const PAGE_WINDOW_SIBLINGS: u32 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream REST backend, always ending in `/`.
    pub upstream_url: Url,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: String,
    pub upstream_timeout: Duration,
    pub cors_origins: Vec<String>,
    /// Placeholder rendered wherever question or answer text is missing.
    pub fallback_label: String,
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, message } => write!(f, "{} is invalid: {}", key, message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the process environment. `main` loads `.env` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        let upstream_url = env::var("UPSTREAM_API_URL")
            .map_err(|_| ConfigError::Missing("UPSTREAM_API_URL"))?;
        let upstream_url = normalize_base_url(&upstream_url).map_err(|e| ConfigError::Invalid {
            key: "UPSTREAM_API_URL",
            message: e.to_string(),
        })?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                message: e.to_string(),
            })?,
            Err(_) => 10,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let fallback_label = env::var("FALLBACK_LABEL").unwrap_or_else(|_| "Unknown".to_string());

        Ok(Self {
            upstream_url,
            bind_addr,
            rust_log,
            log_dir,
            upstream_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
            fallback_label,
        })
    }

    /// Builds a configuration pointing at `upstream`, with every other
    /// setting at its default.
    pub fn for_upstream(upstream: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            upstream_url: normalize_base_url(upstream)?,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
            upstream_timeout: Duration::from_secs(10),
            cors_origins: Vec::new(),
            fallback_label: "Unknown".to_string(),
        })
    }
}

/// Parses `raw` and appends a trailing slash so that relative joins keep
/// the base path (`http://host/api` + `exams/1` -> `http://host/api/exams/1`).
pub fn normalize_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
