use std::io::IsTerminal;

use crate::logger::{format::LoggerFormat, level::LoggerLevel};

/// Diagnostics configuration.
///
/// Diagnostics are written to stderr; stdout is reserved for task status messages.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: std::io::stderr().is_terminal(),
        }
    }
}
