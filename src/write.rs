//! Write operations for modifying data in the catalog table.
//!
//! This module provides operations for writing data to DynamoDB:
//! - Putting new items
//! - Updating items with field-level assignments
//! - Deleting items by primary key

/// Common utilities and types for write operations.
pub mod common;

/// Delete item operation for removing items from tables.
pub mod delete_item;

/// Put item operation for creating items.
pub mod put_item;

/// Update item operation for modifying existing items.
pub mod update_item;
