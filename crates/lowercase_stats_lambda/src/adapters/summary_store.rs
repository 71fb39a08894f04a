use std::collections::HashMap;

use aws_config::SdkConfig;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use lowercase_stats_core::contract::SummaryRecord;

use crate::config::SummaryTableConfig;

pub const PARTITION_KEY_ATTRIBUTE: &str = "file_key";
pub const BUCKET_ATTRIBUTE: &str = "bucket";
pub const LOWERCASE_COUNT_ATTRIBUTE: &str = "lowercase_count";
pub const PROCESSED_AT_ATTRIBUTE: &str = "processed_at";

/// Upsert-only view of the key-value store; later writes for a key win.
pub trait SummaryStore: Send + Sync {
    fn put_summary(&self, record: &SummaryRecord) -> Result<(), String>;
}

pub fn summary_item(record: &SummaryRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            PARTITION_KEY_ATTRIBUTE.to_string(),
            AttributeValue::S(record.key.clone()),
        ),
        (
            BUCKET_ATTRIBUTE.to_string(),
            AttributeValue::S(record.bucket.clone()),
        ),
        (
            LOWERCASE_COUNT_ATTRIBUTE.to_string(),
            AttributeValue::N(record.lowercase_count.to_string()),
        ),
        (
            PROCESSED_AT_ATTRIBUTE.to_string(),
            AttributeValue::S(record.processed_at.clone()),
        ),
    ])
}

pub struct DynamoSummaryStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl DynamoSummaryStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            dynamodb_client,
        }
    }

    /// Returns `None` when no table is configured.
    pub fn from_table_config(sdk_config: &SdkConfig, config: &SummaryTableConfig) -> Option<Self> {
        let table_name = config.table_name.clone()?;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);
        if let Some(region) = &config.region {
            builder = builder.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url.clone());
        }

        Some(Self::new(
            aws_sdk_dynamodb::Client::from_conf(builder.build()),
            table_name,
        ))
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl SummaryStore for DynamoSummaryStore {
    fn put_summary(&self, record: &SummaryRecord) -> Result<(), String> {
        let table_name = self.table_name.clone();
        let item = summary_item(record);
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to write summary to dynamodb: {}",
                            DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_item_is_keyed_by_decoded_object_key() {
        let record = SummaryRecord {
            key: "reports/my file.txt".to_string(),
            bucket: "uploads".to_string(),
            lowercase_count: 42,
            processed_at: "2026-10-16T12:00:00+00:00".to_string(),
        };
        let item = summary_item(&record);

        assert_eq!(item.len(), 4);
        assert_eq!(
            item.get(PARTITION_KEY_ATTRIBUTE),
            Some(&AttributeValue::S("reports/my file.txt".to_string()))
        );
        assert_eq!(
            item.get(BUCKET_ATTRIBUTE),
            Some(&AttributeValue::S("uploads".to_string()))
        );
        assert_eq!(
            item.get(LOWERCASE_COUNT_ATTRIBUTE),
            Some(&AttributeValue::N("42".to_string()))
        );
        assert_eq!(
            item.get(PROCESSED_AT_ATTRIBUTE),
            Some(&AttributeValue::S("2026-10-16T12:00:00+00:00".to_string()))
        );
    }

    fn sdk_config() -> SdkConfig {
        SdkConfig::builder()
            .behavior_version(aws_config::BehaviorVersion::latest())
            .build()
    }

    #[test]
    fn unconfigured_table_builds_no_store() {
        let sdk_config = sdk_config();

        assert!(
            DynamoSummaryStore::from_table_config(&sdk_config, &SummaryTableConfig::default())
                .is_none()
        );
    }

    #[tokio::test]
    async fn configured_table_builds_store_for_that_table() {
        let sdk_config = sdk_config();
        let config = SummaryTableConfig {
            table_name: Some("file-summaries".to_string()),
            region: Some("sa-east-1".to_string()),
            endpoint_url: Some("http://localhost:8000".to_string()),
        };
        let store = DynamoSummaryStore::from_table_config(&sdk_config, &config)
            .expect("configured table should build a store");

        assert_eq!(store.table_name(), "file-summaries");
    }
}
