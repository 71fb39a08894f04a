pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";
pub const TABLE_REGION_VAR: &str = "DYNAMODB_REGION";
pub const TABLE_ENDPOINT_VAR: &str = "DYNAMODB_ENDPOINT_URL";

/// Target table for summary records, read once per process.
///
/// A missing or blank table name disables persistence; a missing region
/// falls back to the ambient AWS region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTableConfig {
    pub table_name: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl SummaryTableConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            table_name: read(TABLE_NAME_VAR),
            region: read(TABLE_REGION_VAR),
            endpoint_url: read(TABLE_ENDPOINT_VAR),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.table_name.is_some()
    }
}
