use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use lowercase_stats_lambda::adapters::object_store::S3ObjectFetcher;
use lowercase_stats_lambda::adapters::summary_store::{DynamoSummaryStore, SummaryStore};
use lowercase_stats_lambda::config::{SummaryTableConfig, TABLE_NAME_VAR};
use lowercase_stats_lambda::handlers::object_created::{
    handle_object_created_event, HandlerDependencies,
};
use lowercase_stats_lambda::logging::{log_info, log_warn};
use serde_json::{json, Value};

const COMPONENT: &str = "object_created_lambda";

fn processing_timestamp() -> String {
    Utc::now().to_rfc3339()
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &HandlerDependencies<'_>,
) -> Result<Value, Error> {
    let response = handle_object_created_event(&event.payload, deps);
    let envelope = response
        .to_invocation_response()
        .map_err(|error| Error::from(format!("failed to serialize batch response: {error}")))?;
    serde_json::to_value(envelope)
        .map_err(|error| Error::from(format!("failed to serialize invocation response: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let table_config = SummaryTableConfig::from_env();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let objects = S3ObjectFetcher::new(aws_sdk_s3::Client::new(&aws_config));
    let summaries = DynamoSummaryStore::from_table_config(&aws_config, &table_config);
    match &summaries {
        Some(store) => log_info(
            COMPONENT,
            "summary_table_configured",
            json!({
                "table_name": store.table_name(),
                "region": table_config.region.clone(),
            }),
        ),
        None => log_warn(
            COMPONENT,
            "summary_table_unconfigured",
            json!({
                "message": format!("{TABLE_NAME_VAR} is not set; summaries will not be persisted"),
            }),
        ),
    }

    let deps = HandlerDependencies {
        objects: &objects,
        summaries: summaries.as_ref().map(|store| store as &dyn SummaryStore),
        now: processing_timestamp,
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
