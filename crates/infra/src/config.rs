//! Configuration loading and representation.
//!
//! Settings come from environment variables:
//!
//! | variable            | default              |
//! |---------------------|----------------------|
//! | `PRODUCT_LIST_FILE` | `data/products.json` |
//! | `BIND_ADDRESS`      | `0.0.0.0:8080`       |
//! | `LOG_FORMAT`        | `json`               |

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use productlist_observability::LogFormat;

pub const PRODUCT_LIST_FILE_VAR: &str = "PRODUCT_LIST_FILE";
pub const BIND_ADDRESS_VAR: &str = "BIND_ADDRESS";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_PRODUCT_LIST_FILE: &str = "data/products.json";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for `{key}`: `{value}` ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON dataset the catalog is loaded from.
    pub product_file: PathBuf,
    pub bind_address: SocketAddr,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (unset or blank values use defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let product_file = get(PRODUCT_LIST_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRODUCT_LIST_FILE));

        let bind_raw = get(BIND_ADDRESS_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: BIND_ADDRESS_VAR,
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| ConfigError::InvalidValue {
                key: LOG_FORMAT_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            product_file,
            bind_address,
            log_format,
        })
    }
}
