use lowercase_stats_core::analysis::{analyze_bytes, debug_preview};
use lowercase_stats_core::contract::{
    BatchResponse, ProcessingResult, RecordStatus, MISSING_RECORDS_MESSAGE,
};
use lowercase_stats_core::notification::{parse_notification, salvage_identifiers};
use serde_json::{json, Value};

use crate::adapters::object_store::ObjectFetcher;
use crate::adapters::summary_store::SummaryStore;
use crate::error::{diagnostic_trace, RecordError};
use crate::handlers::summary_writer::persist_summary;
use crate::logging::{log_error, log_info, log_warn};

const COMPONENT: &str = "object_created_handler";

/// Process-lifetime collaborators, built once by the hosting binary.
pub struct HandlerDependencies<'a> {
    pub objects: &'a dyn ObjectFetcher,
    /// `None` when no summary table is configured.
    pub summaries: Option<&'a dyn SummaryStore>,
    pub now: fn() -> String,
}

/// Processes every notification record in order, one result per record.
///
/// Only a missing or empty `Records` list fails the whole batch (400); any
/// per-record failure becomes an `error` entry and the batch still answers 200.
pub fn handle_object_created_event(
    event: &Value,
    deps: &HandlerDependencies<'_>,
) -> BatchResponse {
    log_info(COMPONENT, "event_received", event.clone());

    let records = match event.get("Records").and_then(Value::as_array) {
        Some(records) if !records.is_empty() => records,
        _ => {
            log_warn(
                COMPONENT,
                "event_rejected",
                json!({ "reason": MISSING_RECORDS_MESSAGE }),
            );
            return BatchResponse::rejected(MISSING_RECORDS_MESSAGE);
        }
    };

    let results: Vec<ProcessingResult> = records
        .iter()
        .enumerate()
        .map(|(index, record)| process_record(index, record, deps))
        .collect();

    let count_status = |status: RecordStatus| {
        results
            .iter()
            .filter(|result| result.status == status)
            .count()
    };
    log_info(
        COMPONENT,
        "batch_completed",
        json!({
            "records": results.len(),
            "ok": count_status(RecordStatus::Ok),
            "partial": count_status(RecordStatus::Partial),
            "error": count_status(RecordStatus::Error),
        }),
    );

    BatchResponse::completed(results)
}

fn process_record(
    record_index: usize,
    record: &Value,
    deps: &HandlerDependencies<'_>,
) -> ProcessingResult {
    log_info(
        COMPONENT,
        "record_started",
        json!({ "record_index": record_index }),
    );

    match analyze_record(record_index, record, deps) {
        Ok(result) => result,
        Err(error) => {
            let (bucket, key) = salvage_identifiers(record);
            let message = error.to_string();
            let trace = diagnostic_trace(record_index, &error);
            log_error(
                COMPONENT,
                "record_failed",
                json!({
                    "record_index": record_index,
                    "stage": error.stage(),
                    "error": message.clone(),
                    "traceback": trace.clone(),
                }),
            );
            ProcessingResult::failure(bucket, key, message, trace)
        }
    }
}

fn analyze_record(
    record_index: usize,
    record: &Value,
    deps: &HandlerDependencies<'_>,
) -> Result<ProcessingResult, RecordError> {
    let target = parse_notification(record)?;
    log_info(
        COMPONENT,
        "object_identified",
        json!({
            "record_index": record_index,
            "bucket": target.bucket.clone(),
            "raw_key": target.raw_key.clone(),
            "decoded_key": target.key.clone(),
        }),
    );

    let bytes = deps
        .objects
        .fetch_object(&target.bucket, &target.key)
        .map_err(|message| RecordError::Fetch {
            bucket: target.bucket.clone(),
            key: target.key.clone(),
            message,
        })?;

    let stats = analyze_bytes(&bytes);
    log_info(
        COMPONENT,
        "object_analyzed",
        json!({
            "record_index": record_index,
            "bytes": stats.byte_len,
            "preview": debug_preview(&bytes),
        }),
    );

    let storage = persist_summary(deps.summaries, &target, &stats, deps.now);
    let result = ProcessingResult::success(&target, &stats, &storage);
    log_info(
        COMPONENT,
        "record_processed",
        json!({
            "record_index": record_index,
            "message": result.message.clone(),
            "db_status": result.db_status,
            "status": result.status,
        }),
    );

    Ok(result)
}
