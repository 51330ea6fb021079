use crate::common;

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SingleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) table_name: String,
}

/// Arguments for single-item read operations (GetItem).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SingleReadArgs {
    /// Whether to use a strongly consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub consistent_read: Option<bool>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<SingleReadArgs> for SingleReadInput {
    fn from(single_read_args: SingleReadArgs) -> Self {
        Self {
            consistent_read: single_read_args.consistent_read,
            table_name: single_read_args.table_name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MultipleReadInput {
    pub(crate) exclusive_start_key: Option<common::Item>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) filter_expression: Option<String>,
    pub(crate) limit: Option<i32>,
    pub(crate) projection_expression: Option<String>,
    pub(crate) table_name: String,
}

/// Arguments for multiple-item read operations (Query, Scan).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleReadArgs<T> {
    /// Filter applied by the service to every evaluated item.
    pub condition: Option<common::condition::ConditionMap<T>>,
    /// The maximum number of items evaluated per page.
    ///
    /// This bounds a single response, not the whole result: the remaining items are
    /// reached by following the continuation key.
    pub limit: Option<i32>,
    /// Which attributes to retrieve. All attributes when `None`.
    pub selection: Option<common::selection::SelectionMap>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl<T: Serialize> TryFrom<MultipleReadArgs<T>> for MultipleReadInput {
    type Error = Error;

    fn try_from(multiple_read_args: MultipleReadArgs<T>) -> Result<Self> {
        let condition_operation: Option<common::ExpressionInput> = multiple_read_args
            .condition
            .map(|condition| condition.try_into())
            .transpose()?;
        let selection_operation: Option<common::ExpressionInput> = multiple_read_args
            .selection
            .map(|selection| selection.into());
        let (
            expression_attribute_names,
            expression_attribute_values,
            filter_expression,
            projection_expression,
        ) = match (condition_operation, selection_operation) {
            (Some(mut condition_operation), Some(selection_operation)) => {
                condition_operation
                    .expression_attribute_names
                    .extend(selection_operation.expression_attribute_names);
                (
                    Some(condition_operation.expression_attribute_names),
                    Some(condition_operation.expression_attribute_values),
                    Some(condition_operation.expression),
                    Some(selection_operation.expression),
                )
            }
            (Some(condition_operation), None) => (
                Some(condition_operation.expression_attribute_names),
                Some(condition_operation.expression_attribute_values),
                Some(condition_operation.expression),
                None,
            ),
            (None, Some(selection_operation)) => (
                Some(selection_operation.expression_attribute_names),
                None,
                None,
                Some(selection_operation.expression),
            ),
            (None, None) => (None, None, None, None),
        };
        let operation = Self {
            exclusive_start_key: None,
            expression_attribute_names,
            expression_attribute_values,
            filter_expression,
            limit: multiple_read_args.limit,
            projection_expression,
            table_name: multiple_read_args.table_name,
        };
        Ok(operation)
    }
}

/// merge the pages of a paginated read into one output
#[macro_export]
macro_rules! merge_pages {
    ($pages:expr, $output_type:ty) => {{
        let (items, count, scanned) = $pages.into_iter().fold(
            (Vec::new(), 0, 0),
            |(mut items, count, scanned), output| {
                if let Some(other_items) = output.items {
                    items.extend(other_items);
                }
                (items, count + output.count, scanned + output.scanned_count)
            },
        );
        <$output_type>::builder()
            .set_items(Some(items))
            .set_count(Some(count))
            .set_scanned_count(Some(scanned))
            .build()
    }};
}

/// apply common single read operation settings to a builder
#[macro_export]
macro_rules! apply_single_read_operation {
    ($builder:expr, $single_read_operation:expr) => {
        $builder
            .set_consistent_read($single_read_operation.consistent_read)
            .table_name($single_read_operation.table_name)
    };
}

/// apply common multiple read operation settings to a builder
#[macro_export]
macro_rules! apply_multiple_read_operation {
    ($builder:expr, $multiple_read_operation:expr) => {
        $builder
            .set_exclusive_start_key($multiple_read_operation.exclusive_start_key)
            .set_expression_attribute_names($multiple_read_operation.expression_attribute_names)
            .set_expression_attribute_values($multiple_read_operation.expression_attribute_values)
            .set_filter_expression($multiple_read_operation.filter_expression)
            .set_limit($multiple_read_operation.limit)
            .set_projection_expression($multiple_read_operation.projection_expression)
            .table_name($multiple_read_operation.table_name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::empty(
        MultipleReadArgs::<String> {
            table_name: "a".to_string(),
            ..Default::default()
        },
        MultipleReadInput {
            table_name: "a".to_string(),
            ..Default::default()
        }
    )]
    #[case::selection_only(
        MultipleReadArgs::<String> {
            limit: Some(5),
            selection: Some(
                common::selection::SelectionMap::Leaves(
                    vec![
                        "b".to_string(),
                    ]
                )
            ),
            table_name: "a".to_string(),
            ..Default::default()
        },
        MultipleReadInput {
            expression_attribute_names: Some(
                collections::HashMap::from(
                    [
                        ("#b".to_string(), "b".to_string()),
                    ]
                )
            ),
            limit: Some(5),
            projection_expression: Some(
                "#b".to_string()
            ),
            table_name: "a".to_string(),
            ..Default::default()
        }
    )]
    fn test_multiple_read_args(
        #[case] args: MultipleReadArgs<String>,
        #[case] expected: MultipleReadInput,
    ) {
        let actual: MultipleReadInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
