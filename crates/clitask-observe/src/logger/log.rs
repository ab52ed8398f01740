use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError};

pub struct Logger;

impl Logger {
    pub fn text(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let filter = cfg.level.to_filter()?;
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(mk_timer());

        init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
    }

    pub fn json(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let filter = cfg.level.to_filter()?;
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(mk_timer());

        init_with(tracing_subscriber::registry().with(filter).with(fmt_layer))
    }

    pub fn journald(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let filter = cfg.level.to_filter()?;
        mk_journald(filter)
    }
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn init_with<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    if tracing::dispatcher::has_been_set() {
        return Err(LoggerError::AlreadyInitialized);
    }
    subscriber
        .try_init()
        .map_err(|e| LoggerError::Install(e.to_string()))
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn mk_journald(filter: EnvFilter) -> Result<(), LoggerError> {
    let journald = tracing_journald::layer()
        .map_err(|e| LoggerError::Install(format!("journald: {e}")))?
        .with_syslog_identifier("clitask".to_string());
    init_with(tracing_subscriber::registry().with(filter).with(journald))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn mk_journald(_filter: EnvFilter) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LoggerFormat, LoggerLevel, init_logger};

    #[test]
    fn second_init_reports_already_initialized() {
        let cfg = LoggerConfig {
            format: LoggerFormat::Text,
            level: LoggerLevel::new("warn").unwrap(),
            with_targets: false,
            use_color: false,
        };

        // Another test in this binary may have won the race; either way a later call must fail.
        let _ = init_logger(&cfg);
        assert!(tracing::dispatcher::has_been_set());
        let err = init_logger(&cfg).unwrap_err();
        assert!(matches!(err, LoggerError::AlreadyInitialized), "{err:?}");
    }

    #[cfg(not(all(target_os = "linux", feature = "journald")))]
    #[test]
    fn journald_without_feature_is_rejected() {
        let cfg = LoggerConfig {
            format: LoggerFormat::Journald,
            ..Default::default()
        };
        assert!(matches!(
            Logger::journald(&cfg),
            Err(LoggerError::JournaldUnavailable)
        ));
    }
}
