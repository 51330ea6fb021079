use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// Separator for attribute path components.
const PATH_SEPARATOR: &str = ".";

/// Map for SET operations.
///
/// Values are attribute values already in wire form, so numbers keep their exact decimal text.
#[derive(Clone, Debug, PartialEq)]
pub enum SetInputsMap {
    /// Leaf assignments - flat list of (attribute_name, value) pairs.
    Leaves(Vec<(String, types::AttributeValue)>),
    /// Node assignments - nested assignments for hierarchical attribute paths.
    Node(IndexMap<String, SetInputsMap>),
}

impl SetInputsMap {
    fn get_set_expression_recursive(
        self,
        keys: &[String],
        index: &mut usize,
    ) -> common::ExpressionInput {
        let mut operations = Vec::new();
        match self {
            Self::Leaves(leaves) => {
                for (key, value) in leaves {
                    let (placeholder, new_keys) = common::add_placeholder(keys, &key);
                    let path = new_keys.join(PATH_SEPARATOR);
                    let value_placeholder = format!(":set{index}");
                    *index += 1;
                    let operation = common::ExpressionInput {
                        expression: format!("{path} = {value_placeholder}"),
                        expression_attribute_names: collections::HashMap::from([(
                            placeholder,
                            key,
                        )]),
                        expression_attribute_values: collections::HashMap::from([(
                            value_placeholder,
                            value,
                        )]),
                    };
                    operations.push(operation);
                }
            }
            Self::Node(map) => {
                for (key, value) in map {
                    let (placeholder, new_keys) = common::add_placeholder(keys, &key);
                    let mut operation = value.get_set_expression_recursive(&new_keys, index);
                    operation
                        .expression_attribute_names
                        .insert(placeholder, key);
                    operations.push(operation);
                }
            }
        }
        common::ExpressionInput::merge(", ", operations)
    }
}

/// Update expression map.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_anime::write::update_item;
///
/// let expr = update_item::UpdateExpressionMap::Set(
///     update_item::SetInputsMap::Leaves(vec![
///         ("rating".to_string(), AttributeValue::N("9.1".to_string())),
///     ]),
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateExpressionMap {
    /// SET operations - assign attribute values.
    Set(SetInputsMap),
}

impl From<UpdateExpressionMap> for common::ExpressionInput {
    fn from(update_expression_map: UpdateExpressionMap) -> Self {
        let mut index = 0;
        match update_expression_map {
            UpdateExpressionMap::Set(set_operations) => {
                let mut operation = set_operations.get_set_expression_recursive(&[], &mut index);
                operation.expression = format!("SET {}", operation.expression);
                operation
            }
        }
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    keys: common::Item,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// DynamoDB creates the item when no item exists under the key.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use dynamodb_anime::{common, write};
/// use indexmap::IndexMap;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     keys: common::key::Keys::record("2018", "Jujutsu Kaisen"),
///     update_expression: write::update_item::UpdateExpressionMap::Set(
///         write::update_item::SetInputsMap::Node(IndexMap::from([(
///             "info".to_string(),
///             write::update_item::SetInputsMap::Leaves(vec![(
///                 "rating".to_string(),
///                 types::AttributeValue::N("9.1".to_string()),
///             )]),
///         )])),
///     ),
///     write_args: write::common::WriteArgs {
///         return_values: Some(types::ReturnValue::UpdatedNew),
///         table_name: "anime".to_string(),
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub keys: common::key::Keys<T>,
    /// The update expression specifying what changes to make.
    pub update_expression: UpdateExpressionMap,
    /// Additional write operation arguments (table name, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let keys = update_item.keys.try_into()?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let update_expression = write_operation.merge_expression(update_item.update_expression.into());
        let operation = Self {
            keys,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize> UpdateItem<T> {
    /// Execute the update item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.keys))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::set_single(
        UpdateExpressionMap::Set(
            SetInputsMap::Leaves(
                vec![
                    (
                        "attr".to_string(),
                        types::AttributeValue::S(
                            "val".to_string()
                        )
                    ),
                ]
            )
        ),
        common::ExpressionInput {
            expression: "SET #attr = :set0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#attr".to_string(), "attr".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "val".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::set_nested_info(
        UpdateExpressionMap::Set(
            SetInputsMap::Node(
                IndexMap::from(
                    [
                        (
                            "info".to_string(),
                            SetInputsMap::Leaves(
                                vec![
                                    (
                                        "rating".to_string(),
                                        types::AttributeValue::N(
                                            "9.1".to_string()
                                        )
                                    ),
                                    (
                                        "year".to_string(),
                                        types::AttributeValue::N(
                                            "2019".to_string()
                                        )
                                    ),
                                ]
                            )
                        ),
                    ]
                )
            )
        ),
        common::ExpressionInput {
            expression: "SET #info.#rating = :set0, #info.#year = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#info".to_string(), "info".to_string()),
                    ("#rating".to_string(), "rating".to_string()),
                    ("#year".to_string(), "year".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::N(
                            "9.1".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::N(
                            "2019".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    fn test_update_expression_map(
        #[case] update_expression_map: UpdateExpressionMap,
        #[case] expected: common::ExpressionInput,
    ) {
        let actual: common::ExpressionInput = update_expression_map.into();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_update_item() {
        let update_item = UpdateItem {
            keys: common::key::Keys::record("2018", "Jujutsu Kaisen"),
            update_expression: UpdateExpressionMap::Set(SetInputsMap::Leaves(vec![(
                "c".to_string(),
                types::AttributeValue::S("d".to_string()),
            )])),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::UpdatedNew),
                table_name: "e".to_string(),
            },
        };
        let actual: UpdateItemInput = update_item.try_into().unwrap();
        let expected = UpdateItemInput {
            keys: collections::HashMap::from([
                (
                    "category".to_string(),
                    types::AttributeValue::S("2018".to_string()),
                ),
                (
                    "title".to_string(),
                    types::AttributeValue::S("Jujutsu Kaisen".to_string()),
                ),
            ]),
            update_expression: "SET #c = :set0".to_string(),
            write_operation: write::common::WriteInput {
                expression_attribute_names: Some(collections::HashMap::from([(
                    "#c".to_string(),
                    "c".to_string(),
                )])),
                expression_attribute_values: Some(collections::HashMap::from([(
                    ":set0".to_string(),
                    types::AttributeValue::S("d".to_string()),
                )])),
                return_values: Some(types::ReturnValue::UpdatedNew),
                table_name: "e".to_string(),
            },
        };
        assert_eq!(actual, expected);
    }
}
