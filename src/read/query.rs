use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// query operation
#[derive(Clone, Debug, Default, PartialEq)]
struct QueryInput {
    key_condition_expression: String,
    multiple_read_operation: read::common::MultipleReadInput,
}

/// Query operation.
///
/// Every page of the result is fetched before `send` returns.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_anime::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let query = read::query::Query {
///     partition_key: common::key::Key {
///         name: "category".to_string(),
///         value: "2018".to_string(),
///     },
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "anime".to_string(),
///         ..Default::default()
///     },
/// };
/// query.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query<T> {
    /// Additional read operation arguments (table name, filter, selection, page size).
    pub multiple_read_args: read::common::MultipleReadArgs<T>,
    /// The partition key value to query for.
    pub partition_key: common::key::Key<T>,
}

impl<T: Serialize> TryFrom<Query<T>> for QueryInput {
    type Error = Error;

    fn try_from(query: Query<T>) -> Result<Self> {
        let mut multiple_read_operation: read::common::MultipleReadInput =
            query.multiple_read_args.try_into()?;
        let partition_key = common::condition::KeyCondition {
            condition: common::condition::Condition::Equals(query.partition_key.value),
            name: query.partition_key.name,
        };
        let key_condition_operation =
            common::condition::KeyCondition::get_expression_operation(vec![partition_key])?;
        let key_condition_expression = key_condition_operation.merge_into(
            &mut multiple_read_operation.expression_attribute_names,
            &mut multiple_read_operation.expression_attribute_values,
        );
        let operation = Self {
            key_condition_expression,
            multiple_read_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize> Query<T> {
    /// Execute the query operation, following the service pagination to the end.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::query::QueryOutput, error::SdkError<operation::query::QueryError>> {
        let query: QueryInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .query()
            .key_condition_expression(query.key_condition_expression);
        let mut paginator =
            crate::apply_multiple_read_operation!(builder, query.multiple_read_operation)
                .into_paginator()
                .send();
        let mut pages = Vec::new();
        while let Some(page) = paginator.next().await {
            pages.push(page?);
        }
        tracing::debug!(pages = pages.len(), "query finished");
        Ok(crate::merge_pages!(pages, operation::query::QueryOutput))
    }
}
