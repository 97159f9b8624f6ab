// Configuration core for the log forwarder.

pub mod conf;
pub mod error;
pub mod protect;
pub mod runtime;

pub use error::{ConfigError, ConfigResult};
