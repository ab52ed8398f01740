use std::panic::AssertUnwindSafe;

use clitask_model::{Elapsed, ExitCode, FailureKind, TaskSummary, json_date};
use futures::FutureExt;
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    clock::{Clock, SystemClock},
    console::Console,
    error::ExecError,
    message::{self, emit},
};

/// Result of one operation, already classified for exit-code translation.
#[derive(Debug)]
pub enum Outcome {
    Success(i32),
    Failure { kind: FailureKind, error: ExecError },
}

impl Outcome {
    fn failure(error: ExecError) -> Self {
        Outcome::Failure {
            kind: error.failure_kind(),
            error,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success(code) => *code,
            Outcome::Failure { kind, .. } => kind.exit_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Everything observed during one run.
#[derive(Debug)]
pub struct TaskReport {
    pub task: String,
    pub started_at: OffsetDateTime,
    pub finished_at: OffsetDateTime,
    pub elapsed: Elapsed,
    pub outcome: Outcome,
}

impl TaskReport {
    #[inline]
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }

    pub fn summary(&self) -> TaskSummary {
        let (failure, error) = match &self.outcome {
            Outcome::Success(_) => (None, None),
            Outcome::Failure { kind, error } => (Some(*kind), Some(message::error_text(error))),
        };
        TaskSummary {
            task: self.task.clone(),
            started_at: json_date(self.started_at),
            finished_at: json_date(self.finished_at),
            elapsed: self.elapsed.to_string(),
            elapsed_ms: self.elapsed.whole_milliseconds(),
            exit_code: self.exit_code(),
            failure,
            error,
        }
    }
}

/// Runs one operation with start/finish messages and exit-code translation.
///
/// The runner awaits the operation exactly once. It forwards the cancellation token
/// but never enforces it: an operation that honours cancellation returns
/// [`ExecError::Cancelled`] and the run ends with [`ExitCode::TerminatedByInterrupt`].
#[derive(Debug, Clone, Default)]
pub struct TaskRunner<K = SystemClock> {
    clock: K,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<K: Clock> TaskRunner<K> {
    pub fn with_clock(clock: K) -> Self {
        Self { clock }
    }

    /// Runs `op` and reports what happened. Never fails: every error, and a panic, ends up in the report.
    pub async fn execute<C, F, Fut, E>(
        &self,
        console: &mut C,
        task: &str,
        op: F,
        cancel: CancellationToken,
    ) -> TaskReport
    where
        C: Console + ?Sized,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<i32, E>>,
        E: Into<ExecError>,
    {
        let started_at = self.clock.now();
        emit(console.out(), task, &message::started(task, started_at));
        info!(target: "clitask.exec", task, "task started");

        // A panic is a failed run like any other: it still gets a finish message and an exit code.
        let result = AssertUnwindSafe(async move { op(cancel).await })
            .catch_unwind()
            .await;
        let finished_at = self.clock.now();
        let elapsed = Elapsed::between(started_at, finished_at);

        let outcome = match result {
            Ok(Ok(code)) if ExitCode::is_success(code) => Outcome::Success(code),
            Ok(Ok(code)) => Outcome::failure(ExecError::NonZeroExit {
                task: task.to_string(),
                code,
            }),
            Ok(Err(e)) => Outcome::failure(e.into()),
            Err(payload) => Outcome::failure(ExecError::from_panic(payload)),
        };

        match &outcome {
            Outcome::Success(_) => {
                emit(
                    console.out(),
                    task,
                    &message::succeeded(task, finished_at, elapsed),
                );
                info!(target: "clitask.exec", task, %elapsed, "task finished");
            }
            Outcome::Failure { kind, error } => {
                emit(
                    console.err(),
                    task,
                    &message::failed(task, error, finished_at, elapsed),
                );
                warn!(
                    target: "clitask.exec",
                    task,
                    code = kind.exit_code(),
                    ?kind,
                    %elapsed,
                    error = %error,
                    "task failed"
                );
            }
        }

        TaskReport {
            task: task.to_string(),
            started_at,
            finished_at,
            elapsed,
            outcome,
        }
    }

    /// Runs `op` and returns the process exit code.
    pub async fn run<C, F, Fut, E>(
        &self,
        console: &mut C,
        task: &str,
        op: F,
        cancel: CancellationToken,
    ) -> i32
    where
        C: Console + ?Sized,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<i32, E>>,
        E: Into<ExecError>,
    {
        self.execute(console, task, op, cancel).await.exit_code()
    }
}

/// Runs an operation that yields nothing; success maps to [`ExitCode::Success`].
pub async fn run_cli_task<C, F, Fut, E>(
    console: &mut C,
    task: &str,
    op: F,
    cancel: CancellationToken,
) -> i32
where
    C: Console + ?Sized,
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Into<ExecError>,
{
    run_cli_task_with_code(
        console,
        task,
        move |cancel| {
            let fut = op(cancel);
            async move { fut.await.map(|()| ExitCode::Success.code()) }
        },
        cancel,
    )
    .await
}

/// Runs an operation that yields its own exit code.
pub async fn run_cli_task_with_code<C, F, Fut, E>(
    console: &mut C,
    task: &str,
    op: F,
    cancel: CancellationToken,
) -> i32
where
    C: Console + ?Sized,
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = Result<i32, E>>,
    E: Into<ExecError>,
{
    TaskRunner::new().run(console, task, op, cancel).await
}
