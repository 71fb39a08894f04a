use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt::Write as _;

use lowercase_stats_core::notification::NotificationError;
use thiserror::Error;

/// Failure that turns one notification record into an `error` result.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error("failed to fetch s3://{bucket}/{key}: {message}")]
    Fetch {
        bucket: String,
        key: String,
        message: String,
    },
}

impl RecordError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Notification(_) => "parse",
            Self::Fetch { .. } => "fetch",
        }
    }
}

/// Human-readable trace: record index, failed stage, and the source chain.
///
/// A captured backtrace is appended when `RUST_BACKTRACE` enables one.
pub fn diagnostic_trace(record_index: usize, error: &RecordError) -> String {
    let mut trace = format!(
        "record #{record_index} failed during {}\nerror: {error}",
        error.stage()
    );

    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(trace, "\ncaused by: {cause}");
        source = cause.source();
    }

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(trace, "\nbacktrace:\n{backtrace}");
    }
    trace
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn trace_names_stage_and_message() {
        let error = RecordError::Fetch {
            bucket: "uploads".to_string(),
            key: "missing.txt".to_string(),
            message: "NoSuchKey".to_string(),
        };
        let trace = diagnostic_trace(3, &error);

        assert!(trace.starts_with("record #3 failed during fetch"));
        assert!(trace.contains("error: failed to fetch s3://uploads/missing.txt: NoSuchKey"));
    }

    #[test]
    fn trace_walks_the_source_chain() {
        let source = lowercase_stats_core::notification::parse_notification(&json!({
            "s3": { "bucket": { "name": 7 } }
        }))
        .expect_err("invalid record should fail");
        let error = RecordError::from(source);
        let trace = diagnostic_trace(0, &error);

        assert_eq!(error.stage(), "parse");
        assert!(trace.contains("caused by: "));
    }
}
