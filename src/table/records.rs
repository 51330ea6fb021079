//! Record operations against one table.

use crate::common::{self, condition, key, selection};
use crate::error::{Error, Result};
use crate::model::{self, Record, RecordSummary, UpdatedInfo};
use crate::table::admin::{self, TableHandle};
use crate::{read, write};

use aws_sdk_dynamodb::{Client, types};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Facade over the record table, bound to one table for its whole lifetime.
///
/// Every method is a direct round trip to DynamoDB; nothing is cached.
#[derive(Clone, Debug)]
pub struct RecordTable {
    client: Client,
    name: String,
    scan_page_size: Option<i32>,
    retry_config: write::batch_write_item::BatchRetryConfig,
}

impl RecordTable {
    /// Bind to a table that exists.
    pub fn new(client: Client, table: TableHandle) -> Self {
        Self {
            client,
            name: table.name,
            scan_page_size: None,
            retry_config: write::batch_write_item::BatchRetryConfig::default(),
        }
    }

    /// Limit the number of items DynamoDB evaluates per scan page.
    pub fn with_scan_page_size(mut self, scan_page_size: Option<i32>) -> Self {
        self.scan_page_size = scan_page_size;
        self
    }

    /// Override the backoff used when batch items come back unprocessed.
    pub fn with_retry_config(mut self, retry_config: write::batch_write_item::BatchRetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Name of the bound table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Put many records with batched writes.
    ///
    /// Fails with [`Error::UnprocessedItems`] when DynamoDB keeps rejecting some of them.
    #[tracing::instrument(name = "dynamodb_anime.write_batch", skip_all, fields(table = %self.name, records = records.len()))]
    pub async fn write_batch(&self, records: &[Record]) -> Result<()> {
        let batch_write = write::batch_write_item::BatchWriteItem {
            table_name: self.name.clone(),
            items: records.iter().map(common::Item::from).collect(),
            retry_config: self.retry_config.clone(),
        };
        let unprocessed = batch_write
            .send(&self.client)
            .await
            .map_err(|err| Error::service("BatchWriteItem", &self.name, err))?;
        if !unprocessed.is_empty() {
            tracing::warn!(count = unprocessed.len(), "items left unprocessed");
            return Err(Error::UnprocessedItems {
                table_name: self.name.clone(),
                count: unprocessed.len(),
            });
        }
        Ok(())
    }

    /// Insert or replace a record.
    #[tracing::instrument(name = "dynamodb_anime.put_record", skip(self), fields(table = %self.name))]
    pub async fn put_record(
        &self,
        title: &str,
        category: &str,
        year: i32,
        rating: Decimal,
    ) -> Result<()> {
        let record = Record::new(category, title, year, rating);
        let put_item = write::put_item::PutItem {
            item: (&record).into(),
            write_args: self.write_args(None),
        };
        put_item
            .send(&self.client)
            .await
            .map_err(|err| Error::service("PutItem", &self.name, err))?;
        Ok(())
    }

    /// Look a record up by its exact key. A missing record is `None`.
    #[tracing::instrument(name = "dynamodb_anime.get_record", skip(self), fields(table = %self.name))]
    pub async fn get_record(&self, title: &str, category: &str) -> Result<Option<Record>> {
        let get_item = read::get_item::GetItem {
            keys: key::Keys::record(category, title),
            single_read_args: read::common::SingleReadArgs {
                consistent_read: Some(true),
                table_name: self.name.clone(),
            },
        };
        let output = get_item
            .send(&self.client)
            .await
            .map_err(|err| Error::service("GetItem", &self.name, err))?;
        output.item.as_ref().map(Record::try_from).transpose()
    }

    /// Set `info.rating` and `info.year`, returning the new values.
    #[tracing::instrument(name = "dynamodb_anime.update_record", skip(self), fields(table = %self.name))]
    pub async fn update_record(
        &self,
        title: &str,
        category: &str,
        rating: Decimal,
        year: i32,
    ) -> Result<UpdatedInfo> {
        let update_item = write::update_item::UpdateItem {
            keys: key::Keys::record(category, title),
            update_expression: write::update_item::UpdateExpressionMap::Set(
                write::update_item::SetInputsMap::Node(IndexMap::from([(
                    model::INFO.to_string(),
                    write::update_item::SetInputsMap::Leaves(vec![
                        (
                            model::RATING.to_string(),
                            types::AttributeValue::N(rating.to_string()),
                        ),
                        (
                            model::YEAR.to_string(),
                            types::AttributeValue::N(year.to_string()),
                        ),
                    ]),
                )])),
            ),
            write_args: self.write_args(Some(types::ReturnValue::UpdatedNew)),
        };
        let output = update_item
            .send(&self.client)
            .await
            .map_err(|err| Error::service("UpdateItem", &self.name, err))?;
        match output.attributes {
            Some(attributes) => UpdatedInfo::try_from(&attributes),
            None => Ok(UpdatedInfo::default()),
        }
    }

    /// Every record of one category, across all result pages.
    #[tracing::instrument(name = "dynamodb_anime.query_by_category", skip(self), fields(table = %self.name))]
    pub async fn query_by_category(&self, category: &str) -> Result<Vec<Record>> {
        let query = read::query::Query {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: self.name.clone(),
                ..Default::default()
            },
            partition_key: key::Key {
                name: key::CATEGORY.to_string(),
                value: category.to_string(),
            },
        };
        let output = query
            .send(&self.client)
            .await
            .map_err(|err| Error::service("Query", &self.name, err))?;
        let records = output
            .items
            .unwrap_or_default()
            .iter()
            .map(Record::try_from)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(records = records.len(), "query finished");
        Ok(records)
    }

    /// Records whose category lies in `low..=high`, projected to category, title and rating.
    ///
    /// The result follows DynamoDB's scan order, not the key order.
    #[tracing::instrument(name = "dynamodb_anime.scan_by_category_range", skip(self), fields(table = %self.name))]
    pub async fn scan_by_category_range(&self, low: &str, high: &str) -> Result<Vec<RecordSummary>> {
        let scan = read::scan::Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                condition: Some(condition::ConditionMap::Leaves(vec![condition::KeyCondition {
                    name: key::CATEGORY.to_string(),
                    condition: condition::Condition::Between(low.to_string(), high.to_string()),
                }])),
                limit: self.scan_page_size,
                selection: Some(selection::SelectionMap::Combined(vec![
                    selection::SelectionMap::Leaves(vec![
                        key::CATEGORY.to_string(),
                        key::TITLE.to_string(),
                    ]),
                    selection::SelectionMap::Node(IndexMap::from([(
                        model::INFO.to_string(),
                        selection::SelectionMap::Leaves(vec![model::RATING.to_string()]),
                    )])),
                ])),
                table_name: self.name.clone(),
            },
        };
        let output = scan
            .send(&self.client)
            .await
            .map_err(|err| Error::service("Scan", &self.name, err))?;
        let summaries = output
            .items
            .unwrap_or_default()
            .iter()
            .map(RecordSummary::try_from)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(records = summaries.len(), "scan finished");
        Ok(summaries)
    }

    /// Delete a record. Deleting a key that holds nothing succeeds.
    #[tracing::instrument(name = "dynamodb_anime.delete_record", skip(self), fields(table = %self.name))]
    pub async fn delete_record(&self, title: &str, category: &str) -> Result<()> {
        let delete_item = write::delete_item::DeleteItem {
            keys: key::Keys::record(category, title),
            write_args: self.write_args(None),
        };
        delete_item
            .send(&self.client)
            .await
            .map_err(|err| Error::service("DeleteItem", &self.name, err))?;
        Ok(())
    }

    /// Delete the bound table and everything in it.
    pub async fn delete_table(self) -> Result<()> {
        admin::delete_table(&self.client, &self.name).await
    }

    fn write_args(&self, return_values: Option<types::ReturnValue>) -> write::common::WriteArgs {
        write::common::WriteArgs {
            return_values,
            table_name: self.name.clone(),
        }
    }
}
