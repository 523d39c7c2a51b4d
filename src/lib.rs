#![deny(missing_docs)]

//! # Gearbox Catalog
//!
//! A serverless CRUD API over a single-table DynamoDB catalog of gearbox
//! products and the categories they belong to.
//!
//! ## Overview
//!
//! Every record lives in one table keyed by `PK`/`SK`:
//! - categories under `category#<name>` / `metadata`
//! - gearboxes under `gearbox#<id>` / `metadata`
//!
//! A `GET` lists the whole catalog, optionally narrowed by query filters; a
//! `POST` creates, updates or deletes a gearbox. Writes are conditional on the
//! existence of the targeted item, so duplicates surface as `409` and missing
//! items as `404`.
//!
//! ## Quick Example
//!
//! ```rust
//! use gearbox_catalog::{config::Config, handler::Dispatcher, store::memory::MemoryStore};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let dispatcher = Dispatcher::new(MemoryStore::seeded().unwrap(), Config::default());
//! let body = json!({"operation": "delete", "gearbox_id": "GB-005"});
//! let response = dispatcher
//!     .handle(json!({"httpMethod": "POST", "body": body.to_string()}))
//!     .await;
//! assert_eq!(response.status_code, 200);
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@handler`] - Request routing and response shaping
//! - [`mod@filter`] - Query filters over listed items
//! - [`mod@gearbox`] - Catalog records and field rules
//! - [`mod@store`] - The item store seam and its backends
//! - [`mod@read`] / [`mod@write`] - DynamoDB operations behind the store

/// Keys, conditions and attribute conversion shared by reads and writes.
pub mod common;

/// Process configuration.
pub mod config;

/// Store and request errors.
pub mod error;

/// Catalog filters.
pub mod filter;

/// Catalog records.
pub mod gearbox;

/// Request handling.
pub mod handler;

/// Read operations against the catalog table.
pub mod read;

/// Storage backends.
pub mod store;

/// Write operations against the catalog table.
///
/// Every write is conditional on the existence, or absence, of the item it
/// targets.
pub mod write;
