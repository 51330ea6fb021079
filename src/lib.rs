#![warn(missing_docs)]

//! # DynamoDB anime
//!
//! A walkthrough of the Amazon DynamoDB table API around a single entity, an anime
//! [`model::Record`] keyed by `category` (partition key) and `title` (sort key).
//!
//! ## Overview
//!
//! - [`table`] checks, creates, lists and deletes tables, and binds a [`table::RecordTable`]
//!   to one of them for the record operations
//! - [`mod@read`] and [`mod@write`] hold typed request builders that compile keys,
//!   conditions, projections and update expressions into DynamoDB expression strings
//! - [`seed`] loads the bootstrap data set, downloading it when missing
//! - [`scenario`] drives the interactive walkthrough through a [`prompt::Prompter`]
//!
//! ## Quick Example
//!
//! ```no_run
//! use aws_sdk_dynamodb::Client;
//! use dynamodb_anime::table::{self, RecordTable, TableConfig};
//! use rust_decimal::Decimal;
//!
//! # async fn example(client: Client) -> dynamodb_anime::Result<()> {
//! let handle = table::admin::create_table(&client, &TableConfig::records("anime")).await?;
//! let records = RecordTable::new(client, handle);
//! records
//!     .put_record("Jujutsu Kaisen", "2018", 2020, Decimal::new(85, 1))
//!     .await?;
//! // "SET #info.#rating = :set0, #info.#year = :set1"
//! let updated = records
//!     .update_record("Jujutsu Kaisen", "2018", Decimal::new(91, 1), 2020)
//!     .await?;
//! assert_eq!(updated.rating, Some(Decimal::new(91, 1)));
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod model;
pub mod prompt;
pub mod read;
pub mod scenario;
pub mod seed;
pub mod table;
pub mod write;

pub use error::{Error, Result};
