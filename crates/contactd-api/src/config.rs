//! Server configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `HOST` | `0.0.0.0` | Bind address |
//! | `PORT` | `8081` | Bind port |
//! | `API_KEY_HEADER` | `X-API-Key` | Header carrying the CRM API key |
//! | `CHAT_BEARER_TOKEN` | `123` | Token the chat endpoint expects after `Bearer ` |
//! | `REQUEST_LOG` | unset | File receiving the request/response journal |
//! | `MAX_BODY_BYTES` | `1048576` | Request body limit |

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderName;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";
pub const DEFAULT_CHAT_BEARER_TOKEN: &str = "123";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {0}")]
    BindAddress(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key_header: HeaderName,
    pub chat_bearer_token: String,
    pub request_log: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            api_key_header: HeaderName::from_static("x-api-key"),
            chat_bearer_token: DEFAULT_CHAT_BEARER_TOKEN.to_string(),
            request_log: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unparseable values
    /// fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let max_body_bytes = match non_empty("MAX_BODY_BYTES") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid MAX_BODY_BYTES, using default");
                DEFAULT_MAX_BODY_BYTES
            }),
            None => defaults.max_body_bytes,
        };

        let api_key_header = match non_empty("API_KEY_HEADER") {
            Some(raw) => HeaderName::try_from(raw.trim()).unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "Invalid API_KEY_HEADER, using {}", DEFAULT_API_KEY_HEADER);
                defaults.api_key_header.clone()
            }),
            None => defaults.api_key_header.clone(),
        };

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            api_key_header,
            chat_bearer_token: non_empty("CHAT_BEARER_TOKEN")
                .unwrap_or(defaults.chat_bearer_token),
            request_log: non_empty("REQUEST_LOG").map(PathBuf::from),
            max_body_bytes,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::BindAddress(addr))
    }
}
