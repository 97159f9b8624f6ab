//! Load — config loading from file and environment variables.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::model::ForwarderConfig;
use crate::error::ConfigResult;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/forwarder/forwarder.toml";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The file was not found; defaults were used.
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "Loaded configuration from: {}", path.display()),
            ConfigSource::Defaults(path) => {
                write!(f, "Config file not found at {}, using defaults", path.display())
            }
        }
    }
}

impl ForwarderConfig {
    /// Load configuration from file, then apply environment overrides.
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// A missing file is not an error; a file that fails to parse is.
    pub fn load() -> ConfigResult<Self> {
        let (config, source) = Self::load_with_source()?;
        tracing::info!("{}", source);
        Ok(config)
    }

    /// Same as [`ForwarderConfig::load()`] but returns the source instead of
    /// logging it, for callers that start logging only after the config is read.
    pub fn load_with_source() -> ConfigResult<(Self, ConfigSource)> {
        let config_path = std::env::var("FORWARDER_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let (mut config, source) = Self::from_path_or_defaults(&config_path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok((config, source))
    }

    /// Read `path` if it exists, otherwise fall back to defaults
    pub fn from_path_or_defaults(path: impl AsRef<Path>) -> ConfigResult<(Self, ConfigSource)> {
        let path = path.as_ref();
        if path.exists() {
            Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())))
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse a TOML document; absent fields take their defaults
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Override selected settings from the environment.
    ///
    /// `FORWARDER_API_KEY` is stored as given, so it reads back as plaintext.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FORWARDER_SERVER_URL") {
            self.output.server_url = url;
        }
        if let Some(level) = lookup("FORWARDER_MINIMUM_LEVEL") {
            self.output.minimum_level = level;
        }
        if let Some(key) = lookup("FORWARDER_API_KEY") {
            self.output.api_key = Some(key);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        self.output.validate()
    }
}
