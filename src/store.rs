//! Item store adapter.
//!
//! [`ItemStore`] is the seam between request handling and storage. Writes are
//! conditional on the existence of the targeted item and report a failed
//! condition as [`StoreError::AlreadyExists`] or [`StoreError::NotFound`].

/// DynamoDB-backed store.
pub mod dynamo;

/// In-process store.
pub mod memory;

use crate::{common, error::StoreError, read, write};

use async_trait::async_trait;

/// Storage for catalog records.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Fetch one page of records, resuming after `exclusive_start_key`.
    async fn scan_page(
        &self,
        exclusive_start_key: Option<common::Record>,
    ) -> Result<read::common::ReadPage, StoreError>;

    /// Fetch every record, following continuation keys until exhausted.
    async fn scan_all(&self) -> Result<Vec<common::Record>, StoreError> {
        let mut records = Vec::new();
        let mut exclusive_start_key = None;
        loop {
            let page = self.scan_page(exclusive_start_key).await?;
            records.extend(page.items);
            match page.last_evaluated_key {
                Some(last_evaluated_key) => exclusive_start_key = Some(last_evaluated_key),
                None => break,
            }
        }
        tracing::debug!(count = records.len(), "scanned all records");
        Ok(records)
    }

    /// Insert a record that must not exist yet.
    async fn create(&self, record: common::Record) -> Result<(), StoreError>;

    /// Overwrite attributes of a record that must exist.
    async fn update(
        &self,
        keys: &common::key::Keys,
        assignments: write::update_item::Assignments,
    ) -> Result<(), StoreError>;

    /// Remove a record that must exist.
    async fn delete(&self, keys: &common::key::Keys) -> Result<(), StoreError>;
}
