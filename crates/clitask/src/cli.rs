use std::{path::PathBuf, time::Duration};

use clap::Parser;
use clitask_exec::proc::ProcConfig;
use clitask_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

/// clitask - run one command as a timed task with translated exit codes
#[derive(Debug, Parser)]
#[command(name = "clitask")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task name shown in status messages (defaults to the program name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Working directory for the program
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Extra environment variable for the program (repeatable)
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,

    /// Milliseconds between SIGTERM and SIGKILL after Ctrl-C
    #[arg(long, default_value_t = 5_000)]
    pub kill_grace_ms: u64,

    /// Diagnostics filter directive
    #[arg(long, env = "CLITASK_LOG", default_value = "warn")]
    pub log_level: LoggerLevel,

    /// Diagnostics format: text, json or journald
    #[arg(long, env = "CLITASK_LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Program to run
    #[arg(value_name = "PROGRAM", required = true)]
    pub program: String,

    /// Arguments passed to the program
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn task_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.program.clone())
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            ..Default::default()
        }
    }

    pub fn proc_config(&self) -> ProcConfig {
        ProcConfig {
            program: self.program.clone(),
            args: self.args.clone(),
            env: self.env.clone(),
            cwd: self.cwd.clone(),
            kill_grace: Duration::from_millis(self.kill_grace_ms),
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if k.is_empty() {
        return Err(format!("empty variable name in `{s}`"));
    }
    Ok((k.to_string(), v.to_string()))
}
