//! Text of the status messages written around a task run.
use std::{error::Error, fmt::Write as _, io::Write};

use clitask_model::{Elapsed, json_date};
use time::OffsetDateTime;
use tracing::warn;

pub(crate) fn started(task: &str, at: OffsetDateTime) -> String {
    format!("\n\n\"{task}\" started at:\n{}\n\n", json_date(at))
}

pub(crate) fn succeeded(task: &str, at: OffsetDateTime, elapsed: Elapsed) -> String {
    format!(
        "\n\n\"{task}\" successfully finished at:\n{}\n\"{task}\" took:\n{elapsed}\n\n",
        json_date(at)
    )
}

pub(crate) fn failed(
    task: &str,
    error: &(dyn Error + 'static),
    at: OffsetDateTime,
    elapsed: Elapsed,
) -> String {
    format!(
        "\n\n{}\n\"{task}\" finished with failure at:\n{}\n\"{task}\" took:\n{elapsed}\n\n",
        error_text(error),
        json_date(at)
    )
}

/// The error followed by one `caused by:` line per source.
pub(crate) fn error_text(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(text, "\ncaused by: {cause}");
        source = cause.source();
    }
    text
}

/// Writes a message to a caller sink. A broken sink never affects the exit code.
pub(crate) fn emit(sink: &mut dyn Write, task: &str, text: &str) {
    if let Err(e) = sink.write_all(text.as_bytes()).and_then(|()| sink.flush()) {
        warn!(target: "clitask.exec", task, error = %e, "failed to write task status");
    }
}
