//! Model — ForwarderConfig and the Output section.

use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::level::LogEventLevel;
use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5341";
pub const DEFAULT_EVENT_BODY_LIMIT_BYTES: u64 = 256 * 1024;
pub const DEFAULT_RAW_PAYLOAD_LIMIT_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_POOLED_CONNECTION_LIFETIME: Duration = Duration::from_secs(2 * 60);
pub const DEFAULT_MINIMUM_LEVEL: &str = "Error";

/// Top-level forwarder configuration document.
///
/// Sections this crate doesn't know about are ignored, so other components
/// can keep their settings in the same file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwarderConfig {
    #[serde(rename = "Output")]
    pub output: OutputConfig,
}

/// Where and how events are shipped to the ingestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OutputConfig {
    pub server_url: String,
    pub event_body_limit_bytes: u64,
    pub raw_payload_limit_bytes: u64,
    #[serde(with = "super::serde_utils::timespan")]
    pub pooled_connection_lifetime: Duration,
    pub minimum_level: String,
    /// Stored form of the API key: plaintext, or `pd.`-tagged protected data.
    /// Read and write it through [`OutputConfig::api_key()`] and
    /// [`OutputConfig::set_api_key()`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip)]
    pub(crate) resolved_level: OnceLock<LogEventLevel>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            event_body_limit_bytes: DEFAULT_EVENT_BODY_LIMIT_BYTES,
            raw_payload_limit_bytes: DEFAULT_RAW_PAYLOAD_LIMIT_BYTES,
            pooled_connection_lifetime: DEFAULT_POOLED_CONNECTION_LIFETIME,
            minimum_level: DEFAULT_MINIMUM_LEVEL.to_string(),
            api_key: None,
            resolved_level: OnceLock::new(),
        }
    }
}

impl OutputConfig {
    /// Minimum level for the forwarder's own diagnostics.
    ///
    /// Resolved from `minimum_level` on first call and cached for the life of
    /// this value. Later edits to `minimum_level` are not picked up.
    pub fn resolved_minimum_level(&self) -> LogEventLevel {
        *self
            .resolved_level
            .get_or_init(|| LogEventLevel::from_name(&self.minimum_level))
    }

    /// Validate size limits. The server URL is passed through untouched.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.event_body_limit_bytes == 0 {
            return Err(ConfigError::Invalid("EventBodyLimitBytes must be > 0".to_string()));
        }
        if self.raw_payload_limit_bytes == 0 {
            return Err(ConfigError::Invalid("RawPayloadLimitBytes must be > 0".to_string()));
        }
        if self.event_body_limit_bytes > self.raw_payload_limit_bytes {
            return Err(ConfigError::Invalid(format!(
                "EventBodyLimitBytes ({}) must not exceed RawPayloadLimitBytes ({})",
                self.event_body_limit_bytes, self.raw_payload_limit_bytes
            )));
        }
        Ok(())
    }
}
