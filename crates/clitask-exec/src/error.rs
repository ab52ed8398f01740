use std::any::Any;

use clitask_model::FailureKind;
use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

/// Failure of a task operation.
///
/// `NonZeroExit` is the exit-status signal: it carries a non-success code to the
/// runner's single failure path.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("\"{task}\" exited with error exit code: {code}")]
    NonZeroExit { task: String, code: i32 },
    #[error("the operation was cancelled")]
    Cancelled,
    #[error("missing program")]
    MissingProgram,
    #[error("failed to spawn {program:?}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("the operation panicked: {0}")]
    Panicked(String),
    #[error("killed by signal")]
    KilledBySignal,
    #[error("io error")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExecError {
    /// Builds [`ExecError::Panicked`] from a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(s) => (*s).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        ExecError::Panicked(message)
    }

    /// Classifies the error for exit-code translation.
    ///
    /// An `ExecError` wrapped inside an `anyhow::Error` is classified by its own kind.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ExecError::NonZeroExit { code, .. } => FailureKind::ExitCode { code: *code },
            ExecError::Cancelled => FailureKind::Cancelled,
            ExecError::Other(e) => e
                .downcast_ref::<ExecError>()
                .map_or(FailureKind::General, ExecError::failure_kind),
            _ => FailureKind::General,
        }
    }
}
