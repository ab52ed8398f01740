use std::{fmt, str::FromStr};

use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Validated `EnvFilter` directive, e.g. `info` or `warn,clitask.exec=debug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(directive: impl Into<String>) -> Result<Self, LoggerError> {
        let directive = directive.into();
        let trimmed = directive.trim();
        if trimmed.is_empty() {
            return Err(LoggerError::InvalidLevel {
                directive,
                reason: "empty directive".to_string(),
            });
        }
        EnvFilter::try_new(trimmed).map_err(|e| LoggerError::InvalidLevel {
            directive: directive.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn to_filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.0).map_err(|e| LoggerError::InvalidLevel {
            directive: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
