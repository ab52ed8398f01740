//! clitask - run one command as a timed task.
//!
//! Usage:
//!   clitask [OPTIONS] [--] <PROGRAM> [ARGS]...
//!
//! Prints start/finish status around the program and exits with its exit code,
//! 130 after Ctrl-C, or 1 if the program could not be run.
mod cli;

use std::{path::Path, process};

use clap::Parser;
use clitask_exec::{CancellationToken, StdConsole, TaskRunner, proc::run_process};
use clitask_model::{ExitCode, TaskSummary};
use clitask_observe::init_logger;
use tracing::{info, warn};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> process::ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logger(&cli.logger_config()) {
        eprintln!("clitask: {e}");
        return to_process_exit(ExitCode::GeneralError.code());
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received; cancelling task");
            interrupt.cancel();
        }
    });

    let task = cli.task_name();
    let proc = cli.proc_config();
    let mut console = StdConsole::new();
    let report = TaskRunner::new()
        .execute(&mut console, &task, |cancel| run_process(proc, cancel), cancel)
        .await;

    if let Some(path) = &cli.report {
        if let Err(e) = write_summary(path, &report.summary()) {
            warn!(path = %path.display(), error = %e, "failed to write task report");
        }
    }

    to_process_exit(report.exit_code())
}

fn write_summary(path: &Path, summary: &TaskSummary) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn to_process_exit(code: i32) -> process::ExitCode {
    process::ExitCode::from(os_code(code))
}

/// Codes the OS cannot carry collapse to the catch-all code.
fn os_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(ExitCode::GeneralError.code() as u8)
}
