use std::{fmt, str::FromStr};

use crate::logger::error::LoggerError;

/// Output format of the diagnostics subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggerFormat {
    #[default]
    Text,
    Json,
    Journald,
}

impl LoggerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            "journald" | "journal" => {
                if cfg!(all(target_os = "linux", feature = "journald")) {
                    Ok(LoggerFormat::Journald)
                } else {
                    Err(LoggerError::JournaldUnavailable)
                }
            }
            _ => Err(LoggerError::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("text".parse::<LoggerFormat>().unwrap(), LoggerFormat::Text);
        assert_eq!(" JSON ".parse::<LoggerFormat>().unwrap(), LoggerFormat::Json);
        assert_eq!("plain".parse::<LoggerFormat>().unwrap(), LoggerFormat::Text);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "yaml".parse::<LoggerFormat>().unwrap_err();
        assert!(matches!(err, LoggerError::UnknownFormat(ref s) if s == "yaml"));
    }

    #[cfg(not(all(target_os = "linux", feature = "journald")))]
    #[test]
    fn journald_unavailable_without_feature() {
        let err = "journald".parse::<LoggerFormat>().unwrap_err();
        assert!(matches!(err, LoggerError::JournaldUnavailable));
    }

    #[test]
    fn display_matches_parse() {
        for f in [LoggerFormat::Text, LoggerFormat::Json] {
            assert_eq!(f.to_string().parse::<LoggerFormat>().unwrap(), f);
        }
    }
}
