use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid country code '{code}' in config {path}")]
    InvalidCountryCode { code: String, path: PathBuf },

    #[error("invalid max_price_brl {value} in config {path}: must be positive")]
    InvalidPriceBound { value: f64, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
