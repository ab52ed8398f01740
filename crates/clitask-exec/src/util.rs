use std::time::Duration;

use tokio::process::{Child, Command};
#[cfg(unix)]
use tracing::warn;

pub fn cmd_program(program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(|s| s.as_str()));
    cmd
}

/// SIGTERM, then SIGKILL once `grace` has passed without the child exiting.
#[cfg(unix)]
pub async fn kill_graceful(child: &mut Child, grace: Duration) -> std::io::Result<()> {
    let Some(id) = child.id() else {
        return Ok(());
    };
    let pid = id as libc::pid_t;
    // SAFETY: plain syscall on a pid we spawned and have not reaped yet.
    let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
    if rc != 0 {
        warn!(
            target: "clitask.exec.proc",
            pid,
            error = %std::io::Error::last_os_error(),
            "SIGTERM failed; falling back to kill"
        );
    } else if tokio::time::timeout(grace, child.wait()).await.is_ok() {
        return Ok(());
    }
    child.kill().await
}

#[cfg(not(unix))]
pub async fn kill_graceful(child: &mut Child, _grace: Duration) -> std::io::Result<()> {
    if child.id().is_none() {
        return Ok(());
    }
    child.kill().await
}
