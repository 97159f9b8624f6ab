//! Boot — logging init, config load, key file, secret resolution.

use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::conf::{ForwarderConfig, LogEventLevel, OutputConfig};
use crate::error::ConfigResult;
use crate::protect::AesStringDataProtector;

pub const DEFAULT_KEY_FILE: &str = "/var/lib/forwarder/forwarder.key";

/// Filter that admits `level` and above, ignoring the environment.
pub fn level_filter(level: LogEventLevel) -> EnvFilter {
    EnvFilter::default().add_directive(level.to_level_filter().into())
}

/// Filter for the forwarder's own output. `RUST_LOG` wins when set.
pub fn log_filter(level: LogEventLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level))
}

/// Initialise the tracing / logging subsystem.
pub fn init_logging(level: LogEventLevel) {
    tracing_subscriber::registry()
        .with(log_filter(level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Recover the API key, opening the key file at `key_path` only when the
/// stored key is protected. Absent and plaintext keys touch no files.
pub fn resolve_api_key(output: &OutputConfig, key_path: impl AsRef<Path>) -> ConfigResult<Option<String>> {
    let api_key = output.api_key_with(|| AesStringDataProtector::load_or_create(key_path.as_ref()))?;

    match (&api_key, output.has_protected_api_key()) {
        (None, _) => info!("No API key configured"),
        (Some(_), true) => info!("API key loaded from protected storage"),
        (Some(_), false) => warn!("API key is stored as plaintext; store it with the protected-data prefix instead"),
    }

    Ok(api_key)
}

/// Load and validate config, start logging at the configured minimum level,
/// then recover the API key.
///
/// Returns `(ForwarderConfig, Option<api_key>)` on success.
pub fn boot() -> ConfigResult<(ForwarderConfig, Option<String>)> {
    let (config, source) = ForwarderConfig::load_with_source()?;

    let level = config.output.resolved_minimum_level();
    init_logging(level);
    info!("Starting forwarder v{}", env!("CARGO_PKG_VERSION"));
    info!("{}", source);

    config.validate()?;
    info!(
        "Output: server_url={}, event_body_limit={}B, raw_payload_limit={}B, connection_lifetime={}s, minimum_level={}",
        config.output.server_url,
        config.output.event_body_limit_bytes,
        config.output.raw_payload_limit_bytes,
        config.output.pooled_connection_lifetime.as_secs(),
        level
    );

    let key_path = std::env::var("FORWARDER_KEY_FILE")
        .unwrap_or_else(|_| DEFAULT_KEY_FILE.to_string());
    let api_key = resolve_api_key(&config.output, &key_path)?;

    Ok((config, api_key))
}
