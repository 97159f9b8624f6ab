//! Level — severity scale and minimum-level name resolution.

use std::fmt;

use tracing::level_filters::LevelFilter;

/// Severity of a self-diagnostic event, in increasing order.
///
/// `Off` sits one step above [`LogEventLevel::MAXIMUM`]; using it as a
/// minimum level suppresses every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogEventLevel {
    Verbose,
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
    Off,
}

impl LogEventLevel {
    pub const MINIMUM: LogEventLevel = LogEventLevel::Verbose;
    pub const MAXIMUM: LogEventLevel = LogEventLevel::Fatal;

    /// Resolve a level name, ignoring case.
    ///
    /// Unrecognised names (including the empty string) fall back to
    /// `Information` rather than failing.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "off" => LogEventLevel::Off,
            "minimum" => LogEventLevel::MINIMUM,
            "maximum" => LogEventLevel::MAXIMUM,
            "verbose" => LogEventLevel::Verbose,
            "debug" => LogEventLevel::Debug,
            "information" => LogEventLevel::Information,
            "warning" => LogEventLevel::Warning,
            "error" => LogEventLevel::Error,
            "fatal" => LogEventLevel::Fatal,
            _ => LogEventLevel::Information,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogEventLevel::Verbose => "Verbose",
            LogEventLevel::Debug => "Debug",
            LogEventLevel::Information => "Information",
            LogEventLevel::Warning => "Warning",
            LogEventLevel::Error => "Error",
            LogEventLevel::Fatal => "Fatal",
            LogEventLevel::Off => "Off",
        }
    }

    /// Filter for the forwarder's own tracing output.
    ///
    /// tracing has no level above ERROR, so `Fatal` shares it.
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogEventLevel::Verbose => LevelFilter::TRACE,
            LogEventLevel::Debug => LevelFilter::DEBUG,
            LogEventLevel::Information => LevelFilter::INFO,
            LogEventLevel::Warning => LevelFilter::WARN,
            LogEventLevel::Error | LogEventLevel::Fatal => LevelFilter::ERROR,
            LogEventLevel::Off => LevelFilter::OFF,
        }
    }
}

impl fmt::Display for LogEventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
