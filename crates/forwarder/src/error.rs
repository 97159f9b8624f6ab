use thiserror::Error;

use crate::protect::ProtectError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Secret protection error: {0}")]
    Protect(#[from] ProtectError),
}

// Convenience type alias
pub type ConfigResult<T> = Result<T, ConfigError>;
