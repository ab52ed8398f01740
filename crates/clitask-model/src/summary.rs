use serde::{Deserialize, Serialize};

use crate::FailureKind;

/// Serializable record of one finished task run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Human-readable task name.
    pub task: String,
    /// RFC 3339 start instant.
    pub started_at: String,
    /// RFC 3339 finish instant.
    pub finished_at: String,
    /// Elapsed time in `[d.]hh:mm:ss[.fffffff]` form.
    pub elapsed: String,
    pub elapsed_ms: u64,
    pub exit_code: i32,
    /// Present only when the task failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Full error text, present only when the task failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskSummary {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}
