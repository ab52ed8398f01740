mod clock;
pub use clock::{Clock, SystemClock};

mod console;
pub use console::{BufferConsole, Console, StdConsole};

mod error;
pub use error::{ExecError, ExecResult};

mod message;

mod runner;
pub use runner::{Outcome, TaskReport, TaskRunner, run_cli_task, run_cli_task_with_code};

#[cfg(feature = "proc")]
pub mod proc;
#[cfg(feature = "proc")]
mod util;

pub use tokio_util::sync::CancellationToken;

pub mod prelude {
    pub use crate::error::{ExecError, ExecResult};
    pub use crate::{CancellationToken, Console, StdConsole, run_cli_task, run_cli_task_with_code};
    pub use clitask_model::ExitCode;
}
