mod elapsed;
pub use elapsed::Elapsed;

mod exit_code;
pub use exit_code::ExitCode;

mod failure;
pub use failure::FailureKind;

mod summary;
pub use summary::TaskSummary;

mod timestamp;
pub use timestamp::json_date;
