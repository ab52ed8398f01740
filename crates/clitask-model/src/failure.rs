use serde::{Deserialize, Serialize};

use crate::ExitCode;

/// Why a task failed, as far as exit-code translation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FailureKind {
    /// The operation finished with a non-success code.
    ExitCode { code: i32 },
    /// The operation observed cancellation and stopped.
    Cancelled,
    /// Any other error raised by the operation.
    General,
}

impl FailureKind {
    /// Exit code reported to the process for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            FailureKind::ExitCode { code } => *code,
            FailureKind::Cancelled => ExitCode::TerminatedByInterrupt.code(),
            FailureKind::General => ExitCode::GeneralError.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(FailureKind::ExitCode { code: 2 }.exit_code(), 2);
        assert_eq!(FailureKind::Cancelled.exit_code(), 130);
        assert_eq!(FailureKind::General.exit_code(), 1);
    }

    #[test]
    fn serde_tagged() {
        let json = serde_json::to_string(&FailureKind::ExitCode { code: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"exitCode","code":3}"#);

        let back: FailureKind = serde_json::from_str(r#"{"kind":"cancelled"}"#).unwrap();
        assert_eq!(back, FailureKind::Cancelled);
    }
}
