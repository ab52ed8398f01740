//! Operation that runs a native process and yields its exit code.
//!
//! Stdio is inherited, so the program's output interleaves with the task status messages
//! the same way it would in a shell script.
use std::{path::PathBuf, process::ExitStatus, time::Duration};

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::{
    error::ExecError,
    util::{cmd_program, kill_graceful},
};

/// Process to run.
#[derive(Clone, Debug)]
pub struct ProcConfig {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    /// Time between SIGTERM and SIGKILL once the run is cancelled.
    pub kill_grace: Duration,
}

impl Default for ProcConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
            kill_grace: Duration::from_secs(5),
        }
    }
}

impl ProcConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Spawns the process and waits for it.
///
/// Returns the exit code; on Unix a process killed by a signal reports `128 + signal`.
/// When `cancel` fires the child is terminated and the call fails with [`ExecError::Cancelled`];
/// a child that died from SIGINT fails the same way.
pub async fn run_process(cfg: ProcConfig, cancel: CancellationToken) -> Result<i32, ExecError> {
    if cfg.program.trim().is_empty() {
        return Err(ExecError::MissingProgram);
    }
    if cancel.is_cancelled() {
        return Err(ExecError::Cancelled);
    }

    let mut cmd = cmd_program(&cfg.program, &cfg.args);
    if let Some(cwd) = &cfg.cwd {
        cmd.current_dir(cwd);
    }
    for (k, v) in &cfg.env {
        cmd.env(k, v);
    }
    cmd.kill_on_drop(true);

    trace!(target: "clitask.exec.proc", program = %cfg.program, args = ?cfg.args, "spawn");
    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        program: cfg.program.clone(),
        source,
    })?;

    tokio::select! {
        status = child.wait() => {
            let status = status?;
            debug!(target: "clitask.exec.proc", %status, "exited");
            exit_code_of(status, cancel.is_cancelled())
        }
        _ = cancel.cancelled() => {
            debug!(target: "clitask.exec.proc", "cancelled; terminating child");
            Err(cancelled_after_kill(kill_graceful(&mut child, cfg.kill_grace).await))
        }
    }
}

/// A cancelled run stays cancelled even when the child could not be killed.
fn cancelled_after_kill(kill: std::io::Result<()>) -> ExecError {
    if let Err(e) = kill {
        warn!(target: "clitask.exec.proc", error = %e, "failed to kill child after cancellation");
    }
    ExecError::Cancelled
}

/// Maps a finished child to its exit code.
///
/// A child killed by SIGINT, or by any signal once `cancelled` is set, was interrupted
/// rather than failing on its own: Ctrl-C reaches the whole process group, so the child
/// usually dies before the token fires.
fn exit_code_of(status: ExitStatus, cancelled: bool) -> Result<i32, ExecError> {
    if let Some(code) = status.code() {
        return Ok(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            if cancelled || signal == libc::SIGINT {
                return Err(ExecError::Cancelled);
            }
            return Ok(128 + signal);
        }
    }
    if cancelled {
        return Err(ExecError::Cancelled);
    }
    Err(ExecError::KilledBySignal)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{BufferConsole, run_cli_task_with_code};
    use std::time::Instant;

    fn sh(script: &str) -> ProcConfig {
        ProcConfig::new("sh").with_args(["-c", script])
    }

    #[tokio::test]
    async fn exit_code_is_returned() {
        let code = run_process(sh("exit 0"), CancellationToken::new()).await.unwrap();
        assert_eq!(code, 0);

        let code = run_process(sh("exit 3"), CancellationToken::new()).await.unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn env_and_cwd_are_applied() {
        let mut cfg = sh(r#"test "$CLITASK_PROBE" = yes && test "$(pwd)" = /"#);
        cfg.env.push(("CLITASK_PROBE".into(), "yes".into()));
        cfg.cwd = Some(PathBuf::from("/"));

        assert_eq!(run_process(cfg, CancellationToken::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn signal_death_maps_to_128_plus_signal() {
        let code = run_process(sh("kill -TERM $$"), CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(code, 128 + libc::SIGTERM);
    }

    #[test]
    fn interrupted_child_is_cancellation() {
        use std::os::unix::process::ExitStatusExt;

        let sigint = ExitStatus::from_raw(libc::SIGINT);
        assert!(matches!(exit_code_of(sigint, false), Err(ExecError::Cancelled)));

        let sigterm = ExitStatus::from_raw(libc::SIGTERM);
        assert_eq!(exit_code_of(sigterm, false).unwrap(), 128 + libc::SIGTERM);
        assert!(matches!(exit_code_of(sigterm, true), Err(ExecError::Cancelled)));

        // A normal exit keeps its code even if the token fired meanwhile.
        let exited = ExitStatus::from_raw(3 << 8);
        assert_eq!(exit_code_of(exited, true).unwrap(), 3);
    }

    #[test]
    fn failed_kill_still_reports_cancellation() {
        let err = cancelled_after_kill(Err(std::io::Error::other("no such process")));
        assert!(matches!(err, ExecError::Cancelled));
        assert_eq!(err.failure_kind(), clitask_model::FailureKind::Cancelled);
    }

    #[tokio::test]
    async fn empty_program_is_rejected() {
        let err = run_process(ProcConfig::new("  "), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::MissingProgram));
    }

    #[tokio::test]
    async fn unknown_program_fails_to_spawn() {
        let err = run_process(
            ProcConfig::new("/definitely/not/a/real/program"),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[tokio::test]
    async fn already_cancelled_does_not_spawn() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = run_process(sh("exit 0"), cancel).await.unwrap_err();
        assert!(matches!(err, ExecError::Cancelled));
    }

    #[tokio::test]
    async fn cancellation_terminates_child() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let mut cfg = sh("sleep 30");
        cfg.kill_grace = Duration::from_millis(200);

        let started = Instant::now();
        let err = run_process(cfg, cancel).await.unwrap_err();
        assert!(matches!(err, ExecError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn through_the_runner() {
        let mut console = BufferConsole::new();
        let code = run_cli_task_with_code(
            &mut console,
            "Build",
            |cancel| run_process(sh("exit 2"), cancel),
            CancellationToken::new(),
        )
        .await;

        assert_eq!(code, 2);
        assert!(console.err_text().contains("\"Build\" exited with error exit code: 2"));

        let mut console = BufferConsole::new();
        let code = run_cli_task_with_code(
            &mut console,
            "Missing",
            |cancel| run_process(ProcConfig::new("/definitely/not/a/real/program"), cancel),
            CancellationToken::new(),
        )
        .await;
        assert_eq!(code, 1);
        assert!(console.err_text().contains("failed to spawn"));
    }
}
