//! Read operations for retrieving data from the catalog table.
//!
//! Reads are page-oriented: every operation returns a [`common::ReadPage`]
//! carrying the key to resume from.

/// Common types for read operations.
pub mod common;

/// Scan operation for retrieving every item of a table.
pub mod scan;
