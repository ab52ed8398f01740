use serde::{Deserialize, Serialize};

/// Process exit codes with a fixed meaning.
///
/// Any other code returned by an operation is passed through verbatim as a plain `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitCode {
    /// The task finished successfully.
    Success = 0,
    /// Catch-all for general errors.
    GeneralError = 1,
    /// The task was terminated by Ctrl-C (128 + SIGINT).
    TerminatedByInterrupt = 130,
}

impl ExitCode {
    /// Returns the numeric value handed to the operating system.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns `true` if `code` is the success code.
    #[inline]
    pub const fn is_success(code: i32) -> bool {
        code == ExitCode::Success.code()
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::GeneralError.code(), 1);
        assert_eq!(ExitCode::TerminatedByInterrupt.code(), 130);
        assert_eq!(i32::from(ExitCode::TerminatedByInterrupt), 130);
    }

    #[test]
    fn success_check() {
        assert!(ExitCode::is_success(0));
        assert!(!ExitCode::is_success(1));
        assert!(!ExitCode::is_success(-1));
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&ExitCode::TerminatedByInterrupt).unwrap();
        assert_eq!(json, r#""terminatedByInterrupt""#);

        let back: ExitCode = serde_json::from_str(r#""generalError""#).unwrap();
        assert_eq!(back, ExitCode::GeneralError);
    }
}
