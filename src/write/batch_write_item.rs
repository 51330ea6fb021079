use crate::common;

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::time;

/// Maximum number of write requests DynamoDB accepts in one batch.
pub const BATCH_WRITE_SIZE: usize = 25;

/// Backoff applied when DynamoDB hands back unprocessed items.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchRetryConfig {
    /// Maximum number of resend attempts per chunk.
    pub max_retries: usize,
    /// Delay before the first resend.
    pub initial_delay: time::Duration,
    /// Upper bound for the doubled delay.
    pub max_delay: time::Duration,
}

impl Default for BatchRetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: time::Duration::from_millis(100),
            max_delay: time::Duration::from_secs(2),
        }
    }
}

/// Exponential backoff delay for the given 0-based attempt, capped at `max`.
pub(crate) fn retry_delay(
    attempt: usize,
    initial: time::Duration,
    max: time::Duration,
) -> time::Duration {
    let factor = 2u128.saturating_pow(u32::try_from(attempt).unwrap_or(u32::MAX));
    let delay_ms = initial.as_millis().saturating_mul(factor);
    let capped_ms = delay_ms.min(max.as_millis());
    time::Duration::from_millis(u64::try_from(capped_ms).unwrap_or(u64::MAX))
}

fn put_requests(items: Vec<common::Item>) -> Result<Vec<types::WriteRequest>, error::BuildError> {
    let mut requests = Vec::with_capacity(items.len());
    for item in items {
        let put_request = types::PutRequest::builder().set_item(Some(item)).build()?;
        requests.push(
            types::WriteRequest::builder()
                .set_put_request(Some(put_request))
                .build(),
        );
    }
    Ok(requests)
}

fn take_unprocessed(
    output: operation::batch_write_item::BatchWriteItemOutput,
    table_name: &str,
) -> Vec<common::Item> {
    output
        .unprocessed_items
        .and_then(|mut unprocessed| unprocessed.remove(table_name))
        .unwrap_or_default()
        .into_iter()
        .filter_map(|request| request.put_request.map(|put| put.item))
        .collect()
}

/// Batch write item operation.
///
/// Items are sent in chunks of [`BATCH_WRITE_SIZE`]. Whatever DynamoDB reports as unprocessed is
/// resent with exponential backoff; items still unprocessed after the last retry are returned.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_anime::{model, write};
/// use rust_decimal::Decimal;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let record = model::Record::new("2018", "Jujutsu Kaisen", 2018, Decimal::new(85, 1));
/// let batch_write = write::batch_write_item::BatchWriteItem {
///     table_name: "anime".to_string(),
///     items: vec![(&record).into()],
///     ..Default::default()
/// };
/// let unprocessed = batch_write.send(client).await?;
/// assert!(unprocessed.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchWriteItem {
    /// The table to write to.
    pub table_name: String,
    /// The items to put into the table.
    pub items: Vec<common::Item>,
    /// Backoff for unprocessed items.
    pub retry_config: BatchRetryConfig,
}

impl BatchWriteItem {
    /// Execute the batch write item operation.
    ///
    /// Returns the items DynamoDB still left unprocessed after all retries.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        Vec<common::Item>,
        error::SdkError<operation::batch_write_item::BatchWriteItemError>,
    > {
        let mut leftover = Vec::new();
        let mut items = self.items;
        while !items.is_empty() {
            let rest = items.split_off(items.len().min(BATCH_WRITE_SIZE));
            let mut pending = items;
            items = rest;
            let mut attempt = 0;
            loop {
                let requests = put_requests(pending)?;
                let output = client
                    .batch_write_item()
                    .request_items(&self.table_name, requests)
                    .send()
                    .await?;
                pending = take_unprocessed(output, &self.table_name);
                if pending.is_empty() || attempt >= self.retry_config.max_retries {
                    break;
                }
                tracing::debug!(
                    table_name = %self.table_name,
                    unprocessed = pending.len(),
                    attempt,
                    "resending unprocessed items"
                );
                tokio::time::sleep(retry_delay(
                    attempt,
                    self.retry_config.initial_delay,
                    self.retry_config.max_delay,
                ))
                .await;
                attempt += 1;
            }
            leftover.extend(pending);
        }
        Ok(leftover)
    }
}
