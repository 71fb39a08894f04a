use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const NOTIFICATION_FIELD: &str = "s3";
const BUCKET_NAME_FIELD: &str = "s3.bucket.name";
const OBJECT_KEY_FIELD: &str = "s3.object.key";

/// Object addressed by one object-created notification record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTarget {
    pub bucket: String,
    pub raw_key: String,
    /// `raw_key` after URL component decoding; used for fetches and storage.
    pub key: String,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Record sem campo '{field}'")]
    MissingField { field: &'static str },

    #[error("Record com campo '{field}' inválido: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: Option<S3Bucket>,
    object: Option<S3Object>,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: Option<String>,
}

pub fn parse_notification(record: &Value) -> Result<ObjectTarget, NotificationError> {
    let entity = match record.get(NOTIFICATION_FIELD) {
        None | Some(Value::Null) => {
            return Err(NotificationError::MissingField {
                field: NOTIFICATION_FIELD,
            })
        }
        Some(Value::Object(fields)) if fields.is_empty() => {
            return Err(NotificationError::MissingField {
                field: NOTIFICATION_FIELD,
            })
        }
        Some(value) => {
            S3Entity::deserialize(value).map_err(|source| NotificationError::InvalidField {
                field: NOTIFICATION_FIELD,
                source,
            })?
        }
    };

    let bucket = entity
        .bucket
        .and_then(|bucket| bucket.name)
        .ok_or(NotificationError::MissingField {
            field: BUCKET_NAME_FIELD,
        })?;
    let raw_key = entity
        .object
        .and_then(|object| object.key)
        .ok_or(NotificationError::MissingField {
            field: OBJECT_KEY_FIELD,
        })?;

    let key = decode_object_key(&raw_key);
    Ok(ObjectTarget {
        bucket,
        raw_key,
        key,
    })
}

/// Decodes an S3 event object key: `+` is a space and `%XX` is a raw byte.
///
/// Decoded bytes that do not form valid UTF-8 are replaced with U+FFFD and
/// malformed escapes are kept verbatim.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Best-effort bucket and decoded key of a record that failed to parse.
pub fn salvage_identifiers(record: &Value) -> (Option<String>, Option<String>) {
    let Some(entity) = record.get(NOTIFICATION_FIELD) else {
        return (None, None);
    };

    let bucket = entity
        .pointer("/bucket/name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let key = entity
        .pointer("/object/key")
        .and_then(Value::as_str)
        .map(decode_object_key);
    (bucket, key)
}
