use crate::{common, error::StoreError, read, store::ItemStore, write};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, error::SdkError};

/// Store backed by a single DynamoDB table.
///
/// ```rust,no_run
/// use gearbox_catalog::store::{ItemStore, dynamo::DynamoStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
/// let store = DynamoStore::new(aws_sdk_dynamodb::Client::new(&config), "gearbox_catalog");
/// let records = store.scan_all().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Store over `table_name`.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn write_args(&self, condition: common::condition::Condition) -> write::common::WriteArgs {
        write::common::WriteArgs {
            condition: Some(common::condition::KeyCondition {
                condition,
                name: common::key::PARTITION_KEY.to_string(),
            }),
            table_name: self.table_name.clone(),
        }
    }
}

/// Map an SDK failure, telling a failed existence condition apart.
fn classify<E>(
    error: SdkError<E>,
    is_condition_failure: impl Fn(&E) -> bool,
    condition_error: StoreError,
) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
    SdkError<E>: std::error::Error + Send + Sync + 'static,
{
    match error.as_service_error() {
        Some(service_error) if is_condition_failure(service_error) => condition_error,
        _ => StoreError::storage(error),
    }
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn scan_page(
        &self,
        exclusive_start_key: Option<common::Record>,
    ) -> Result<read::common::ReadPage, StoreError> {
        let scan = read::scan::Scan {
            exclusive_start_key,
            table_name: self.table_name.clone(),
        };
        scan.send(&self.client).await.map_err(StoreError::storage)
    }

    async fn create(&self, record: common::Record) -> Result<(), StoreError> {
        let put_item = write::put_item::PutItem {
            item: record,
            write_args: self.write_args(common::condition::Condition::NotExists),
        };
        put_item
            .send(&self.client)
            .await
            .map_err(|error| {
                classify(
                    error,
                    |service_error| service_error.is_conditional_check_failed_exception(),
                    StoreError::AlreadyExists,
                )
            })?;
        Ok(())
    }

    async fn update(
        &self,
        keys: &common::key::Keys,
        assignments: write::update_item::Assignments,
    ) -> Result<(), StoreError> {
        let update_item = write::update_item::UpdateItem {
            keys: keys.clone(),
            assignments,
            write_args: self.write_args(common::condition::Condition::Exists),
        };
        update_item
            .send(&self.client)
            .await
            .map_err(|error| {
                classify(
                    error,
                    |service_error| service_error.is_conditional_check_failed_exception(),
                    StoreError::NotFound,
                )
            })?;
        Ok(())
    }

    async fn delete(&self, keys: &common::key::Keys) -> Result<(), StoreError> {
        let delete_item = write::delete_item::DeleteItem {
            keys: keys.clone(),
            write_args: self.write_args(common::condition::Condition::Exists),
        };
        delete_item
            .send(&self.client)
            .await
            .map_err(|error| {
                classify(
                    error,
                    |service_error| service_error.is_conditional_check_failed_exception(),
                    StoreError::NotFound,
                )
            })?;
        Ok(())
    }
}
