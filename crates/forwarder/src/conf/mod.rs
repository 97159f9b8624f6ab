//! Conf module — output configuration model, loading, secret encoding, and level resolution.

pub mod model;
pub mod load;
pub mod level;
pub mod secret;
pub mod serde_utils;

pub use model::{ForwarderConfig, OutputConfig};
pub use load::ConfigSource;
pub use level::LogEventLevel;
pub use secret::PROTECTED_DATA_PREFIX;
