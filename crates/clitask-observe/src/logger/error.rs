use thiserror::Error;

/// Errors raised while configuring or installing the diagnostics subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected: text|json|journald)")]
    UnknownFormat(String),
    #[error("journald output needs Linux and the `journald` feature")]
    JournaldUnavailable,
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
    #[error("invalid log level directive {directive:?}: {reason}")]
    InvalidLevel { directive: String, reason: String },
    #[error("failed to install subscriber: {0}")]
    Install(String),
}
