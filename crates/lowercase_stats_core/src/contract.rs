use serde::{Deserialize, Serialize};

use crate::analysis::TextStats;
use crate::notification::ObjectTarget;

pub const STATUS_CODE_OK: u16 = 200;
pub const STATUS_CODE_BAD_REQUEST: u16 = 400;
pub const MISSING_RECORDS_MESSAGE: &str =
    "Evento sem 'Records' - verifique o tipo de trigger (deve ser S3 ObjectCreated).";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Ok,
    /// Analysis succeeded but the summary could not be persisted.
    Partial,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageStatus {
    Saved,
    SkippedConfig,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOutcome {
    Saved,
    SkippedConfig,
    Failed(String),
}

impl StorageOutcome {
    pub fn status(&self) -> StorageStatus {
        match self {
            Self::Saved => StorageStatus::Saved,
            Self::SkippedConfig => StorageStatus::SkippedConfig,
            Self::Failed(_) => StorageStatus::Failed,
        }
    }
}

/// Per-record entry of the batch response, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingResult {
    pub bucket: Option<String>,
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(rename = "minusculas", skip_serializing_if = "Option::is_none")]
    pub lowercase_count: Option<usize>,
    #[serde(rename = "mensagem", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_status: Option<StorageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_error: Option<String>,
    pub status: RecordStatus,
    #[serde(rename = "erro", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl ProcessingResult {
    pub fn success(target: &ObjectTarget, stats: &TextStats, storage: &StorageOutcome) -> Self {
        let (status, db_error) = match storage {
            StorageOutcome::Failed(message) => (RecordStatus::Partial, Some(message.clone())),
            StorageOutcome::Saved | StorageOutcome::SkippedConfig => (RecordStatus::Ok, None),
        };

        Self {
            bucket: Some(target.bucket.clone()),
            key: Some(target.key.clone()),
            bytes: Some(stats.byte_len),
            lowercase_count: Some(stats.lowercase_count),
            message: Some(summary_message(&target.key, stats.lowercase_count)),
            db_status: Some(storage.status()),
            db_error,
            status,
            error: None,
            traceback: None,
        }
    }

    pub fn failure(
        bucket: Option<String>,
        key: Option<String>,
        error: impl Into<String>,
        traceback: impl Into<String>,
    ) -> Self {
        Self {
            bucket,
            key,
            bytes: None,
            lowercase_count: None,
            message: None,
            db_status: None,
            db_error: None,
            status: RecordStatus::Error,
            error: Some(error.into()),
            traceback: Some(traceback.into()),
        }
    }
}

pub fn summary_message(key: &str, lowercase_count: usize) -> String {
    format!("O arquivo '{key}' contém {lowercase_count} letras minúsculas.")
}

/// Item persisted to the key-value store, addressed by the decoded object key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRecord {
    pub key: String,
    pub bucket: String,
    pub lowercase_count: usize,
    pub processed_at: String,
}

impl SummaryRecord {
    pub fn new(target: &ObjectTarget, stats: &TextStats, processed_at: impl Into<String>) -> Self {
        Self {
            key: target.key.clone(),
            bucket: target.bucket.clone(),
            lowercase_count: stats.lowercase_count,
            processed_at: processed_at.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BatchBody {
    Results {
        results: Vec<ProcessingResult>,
    },
    Rejected {
        #[serde(rename = "erro")]
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResponse {
    pub status_code: u16,
    pub body: BatchBody,
}

impl BatchResponse {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_CODE_BAD_REQUEST,
            body: BatchBody::Rejected {
                error: message.into(),
            },
        }
    }

    pub fn completed(results: Vec<ProcessingResult>) -> Self {
        Self {
            status_code: STATUS_CODE_OK,
            body: BatchBody::Results { results },
        }
    }

    pub fn results(&self) -> &[ProcessingResult] {
        match &self.body {
            BatchBody::Results { results } => results,
            BatchBody::Rejected { .. } => &[],
        }
    }

    /// Envelope handed back to the invoking host; `body` is JSON text.
    pub fn to_invocation_response(&self) -> Result<InvocationResponse, serde_json::Error> {
        Ok(InvocationResponse {
            status_code: self.status_code,
            body: serde_json::to_string(&self.body)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}
