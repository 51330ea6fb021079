//! Write operations for modifying items in DynamoDB tables.
//!
//! - Putting new items or replacing existing ones
//! - Updating attributes of an item
//! - Deleting items by primary key
//! - Batch writing many items

/// Batch write item operation for loading many items.
pub mod batch_write_item;

/// Common utilities and types for write operations.
pub mod common;

/// Delete item operation for removing items from tables.
pub mod delete_item;

/// Put item operation for creating or replacing items.
pub mod put_item;

/// Update item operation for modifying existing items.
pub mod update_item;
