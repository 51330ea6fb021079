//! Read operations for retrieving items from DynamoDB tables.
//!
//! - Getting individual items by primary key
//! - Querying items by partition key
//! - Scanning a table with a filter and a projection

/// Common utilities and types for read operations.
pub mod common;

/// Get item operation for retrieving a single item by primary key.
pub mod get_item;

/// Query operation for retrieving the items of one partition.
pub mod query;

/// Scan operation with explicit continuation-key pagination.
pub mod scan;
