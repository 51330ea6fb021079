//! Table access facade.
//!
//! [`admin`] manages tables as a whole; [`RecordTable`] runs the record operations
//! against one of them. Both translate SDK failures into [`crate::Error`], logging
//! each fault once where it occurs.

/// Table existence, creation, listing and deletion.
pub mod admin;

/// Record operations bound to one table.
pub mod records;

pub use admin::{TableConfig, TableHandle};
pub use records::RecordTable;
