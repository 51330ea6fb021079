use crate::read;

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    multiple_read_operation: read::common::MultipleReadInput,
}

/// Scan operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_anime::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan: read::scan::Scan<String> = read::scan::Scan {
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "anime".to_string(),
///         ..Default::default()
///     },
/// };
/// let output = scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan<T> {
    /// Additional read operation arguments (table name, filter, selection, page size).
    pub multiple_read_args: read::common::MultipleReadArgs<T>,
}

impl<T: Serialize> TryFrom<Scan<T>> for ScanInput {
    type Error = Error;

    fn try_from(scan: Scan<T>) -> Result<Self> {
        let multiple_read_operation: read::common::MultipleReadInput =
            scan.multiple_read_args.try_into()?;
        Ok(Self {
            multiple_read_operation,
        })
    }
}

impl<T: Serialize> Scan<T> {
    /// Execute the scan operation.
    ///
    /// Pages are requested one after another, each resuming from the `LastEvaluatedKey` of the
    /// previous response, until a response carries no continuation key. The items of all pages
    /// are returned in the order the service produced them.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.try_into().map_err(error::BuildError::other)?;
        let mut pages = Vec::new();
        let mut exclusive_start_key = None;
        loop {
            let mut multiple_read_operation = scan.multiple_read_operation.clone();
            multiple_read_operation.exclusive_start_key = exclusive_start_key.take();
            let page =
                crate::apply_multiple_read_operation!(client.scan(), multiple_read_operation)
                    .send()
                    .await?;
            // an empty key map means the same as no key
            exclusive_start_key = page
                .last_evaluated_key
                .clone()
                .filter(|key| !key.is_empty());
            tracing::debug!(
                page = pages.len(),
                items = page.count,
                more = exclusive_start_key.is_some(),
                "scan page received"
            );
            pages.push(page);
            if exclusive_start_key.is_none() {
                break;
            }
        }
        Ok(crate::merge_pages!(pages, operation::scan::ScanOutput))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common;

    use aws_sdk_dynamodb::types;
    use aws_smithy_mocks::{mock, mock_client};
    use indexmap::IndexMap;
    use rstest::rstest;
    use std::collections;

    #[rstest]
    #[case::empty(
        Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "a".to_string(),
                ..Default::default()
            },
        },
        ScanInput {
            multiple_read_operation: read::common::MultipleReadInput {
                table_name: "a".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::filter_and_projection(
        Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                condition: Some(
                    common::condition::ConditionMap::Leaves(
                        vec![
                            common::condition::KeyCondition {
                                name: "category".to_string(),
                                condition: common::condition::Condition::Between(
                                    "2010".to_string(),
                                    "2020".to_string()
                                ),
                            },
                        ]
                    )
                ),
                limit: Some(3),
                selection: Some(
                    common::selection::SelectionMap::Combined(
                        vec![
                            common::selection::SelectionMap::Leaves(
                                vec![
                                    "category".to_string(),
                                    "title".to_string(),
                                ]
                            ),
                            common::selection::SelectionMap::Node(
                                IndexMap::from(
                                    [(
                                        "info".to_string(),
                                        common::selection::SelectionMap::Leaves(
                                            vec![
                                                "rating".to_string(),
                                            ]
                                        ),
                                    )]
                                )
                            ),
                        ]
                    )
                ),
                table_name: "b".to_string(),
            },
        },
        ScanInput {
            multiple_read_operation: read::common::MultipleReadInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#category".to_string(), "category".to_string()),
                            ("#title".to_string(), "title".to_string()),
                            ("#info".to_string(), "info".to_string()),
                            ("#rating".to_string(), "rating".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":category_between0".to_string(),
                                types::AttributeValue::S(
                                    "2010".to_string()
                                )
                            ),
                            (
                                ":category_between1".to_string(),
                                types::AttributeValue::S(
                                    "2020".to_string()
                                )
                            ),
                        ]
                    )
                ),
                filter_expression: Some(
                    "#category BETWEEN :category_between0 AND :category_between1".to_string()
                ),
                limit: Some(3),
                projection_expression: Some(
                    "#category, #title, #info.#rating".to_string()
                ),
                table_name: "b".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_scan(#[case] args: Scan<String>, #[case] expected: ScanInput) {
        let actual: ScanInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    fn title_item(title: &str) -> common::Item {
        collections::HashMap::from([("title".to_string(), types::AttributeValue::S(title.to_string()))])
    }

    #[tokio::test]
    async fn test_scan_follows_continuation_keys() {
        let first_page = mock!(Client::scan)
            .match_requests(|input| input.exclusive_start_key().is_none())
            .then_output(|| {
                operation::scan::ScanOutput::builder()
                    .set_items(Some(vec![title_item("a"), title_item("b")]))
                    .count(2)
                    .scanned_count(2)
                    .set_last_evaluated_key(Some(title_item("b")))
                    .build()
            });
        let second_page = mock!(Client::scan)
            .match_requests(|input| input.exclusive_start_key() == Some(&title_item("b")))
            .then_output(|| {
                operation::scan::ScanOutput::builder()
                    .set_items(Some(vec![title_item("c")]))
                    .count(1)
                    .scanned_count(2)
                    .set_last_evaluated_key(Some(collections::HashMap::new()))
                    .build()
            });
        let client = mock_client!(aws_sdk_dynamodb, [&first_page, &second_page]);
        let scan: Scan<String> = Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "a".to_string(),
                ..Default::default()
            },
        };

        let output = scan.send(&client).await.unwrap();

        assert_eq!(
            output.items,
            Some(vec![title_item("a"), title_item("b"), title_item("c")])
        );
        assert_eq!(output.count, 3);
        assert_eq!(output.scanned_count, 4);
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(second_page.num_calls(), 1);
    }
}
