use lowercase_stats_core::analysis::TextStats;
use lowercase_stats_core::contract::{StorageOutcome, SummaryRecord};
use lowercase_stats_core::notification::ObjectTarget;
use serde_json::json;

use crate::adapters::summary_store::SummaryStore;
use crate::logging::{log_info, log_warn};

const COMPONENT: &str = "summary_writer";

/// Upserts the summary for one analyzed object.
///
/// Write failures are reported as [`StorageOutcome::Failed`] rather than
/// propagated, so the batch keeps going.
pub fn persist_summary(
    store: Option<&dyn SummaryStore>,
    target: &ObjectTarget,
    stats: &TextStats,
    now: fn() -> String,
) -> StorageOutcome {
    let Some(store) = store else {
        return StorageOutcome::SkippedConfig;
    };

    let summary = SummaryRecord::new(target, stats, now());
    match store.put_summary(&summary) {
        Ok(()) => {
            log_info(
                COMPONENT,
                "summary_saved",
                json!({
                    "key": summary.key,
                    "bucket": summary.bucket,
                    "lowercase_count": summary.lowercase_count,
                }),
            );
            StorageOutcome::Saved
        }
        Err(message) => {
            log_warn(
                COMPONENT,
                "summary_write_failed",
                json!({
                    "key": summary.key,
                    "bucket": summary.bucket,
                    "error": message.clone(),
                }),
            );
            StorageOutcome::Failed(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct RecordingStore {
        writes: Mutex<Vec<SummaryRecord>>,
    }

    impl SummaryStore for RecordingStore {
        fn put_summary(&self, record: &SummaryRecord) -> Result<(), String> {
            self.writes
                .lock()
                .expect("poisoned mutex")
                .push(record.clone());
            Ok(())
        }
    }

    struct RejectingStore;

    impl SummaryStore for RejectingStore {
        fn put_summary(&self, _record: &SummaryRecord) -> Result<(), String> {
            Err("ProvisionedThroughputExceededException".to_string())
        }
    }

    fn fixed_now() -> String {
        "2026-10-16T12:00:00+00:00".to_string()
    }

    fn target() -> ObjectTarget {
        ObjectTarget {
            bucket: "uploads".to_string(),
            raw_key: "notes+final.txt".to_string(),
            key: "notes final.txt".to_string(),
        }
    }

    fn stats() -> TextStats {
        TextStats {
            byte_len: 10,
            char_count: 10,
            lowercase_count: 7,
        }
    }

    #[test]
    fn writes_summary_keyed_by_decoded_key() {
        let store = RecordingStore {
            writes: Mutex::new(Vec::new()),
        };
        let outcome = persist_summary(Some(&store), &target(), &stats(), fixed_now);

        assert_eq!(outcome, StorageOutcome::Saved);
        let writes = store.writes.lock().expect("poisoned mutex");
        assert_eq!(
            *writes,
            vec![SummaryRecord {
                key: "notes final.txt".to_string(),
                bucket: "uploads".to_string(),
                lowercase_count: 7,
                processed_at: fixed_now(),
            }]
        );
    }

    #[test]
    fn missing_store_skips_without_error() {
        assert_eq!(
            persist_summary(None, &target(), &stats(), fixed_now),
            StorageOutcome::SkippedConfig
        );
    }

    #[test]
    fn write_failure_is_reported_not_propagated() {
        let outcome = persist_summary(Some(&RejectingStore), &target(), &stats(), fixed_now);

        assert_eq!(
            outcome,
            StorageOutcome::Failed("ProvisionedThroughputExceededException".to_string())
        );
    }
}
