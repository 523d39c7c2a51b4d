use gearbox_catalog::{
    config::{Config, StoreBackend},
    handler::Dispatcher,
    store::{ItemStore, dynamo::DynamoStore, memory::MemoryStore},
};

use aws_config::BehaviorVersion;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env();
    tracing_subscriber::fmt()
        .with_max_level(config.log_level.level_filter())
        .json()
        .with_target(false)
        .with_current_span(false)
        .init();

    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("serving the sample catalog from memory");
            serve(Dispatcher::new(MemoryStore::seeded()?, config)).await
        }
        StoreBackend::DynamoDb => {
            tracing::info!(table = %config.table_name, "serving from DynamoDB");
            let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
            let client = aws_sdk_dynamodb::Client::new(&aws);
            let store = DynamoStore::new(client, config.table_name.clone());
            serve(Dispatcher::new(store, config)).await
        }
    }
}

async fn serve<S>(dispatcher: Dispatcher<S>) -> Result<(), Error>
where
    S: ItemStore + 'static,
{
    let dispatcher = Arc::new(dispatcher);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let dispatcher = dispatcher.clone();
        async move { Ok::<_, Error>(dispatcher.handle(event.payload).await) }
    }))
    .await
}
