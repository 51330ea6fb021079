use crate::common;

use indexmap::IndexMap;
use std::collections;

/// Map for selecting attributes in projection expressions.
///
/// ```rust
/// use dynamodb_anime::common::selection;
/// use indexmap::IndexMap;
///
/// // category, title, info.rating
/// let selection = selection::SelectionMap::Combined(vec![
///     selection::SelectionMap::Leaves(vec!["category".to_string(), "title".to_string()]),
///     selection::SelectionMap::Node(IndexMap::from([(
///         "info".to_string(),
///         selection::SelectionMap::Leaves(vec!["rating".to_string()]),
///     )])),
/// ]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectionMap {
    /// Flat list of attribute names at the current level.
    Leaves(Vec<String>),
    /// Nested selection for hierarchical attribute paths.
    Node(IndexMap<String, SelectionMap>),
    /// Several selections at the same level.
    Combined(Vec<SelectionMap>),
}

impl From<SelectionMap> for common::ExpressionInput {
    fn from(selection_map: SelectionMap) -> Self {
        selection_map.get_selection_operation_recursive(&[])
    }
}

impl SelectionMap {
    fn get_selection_operation_recursive(self, keys: &[String]) -> common::ExpressionInput {
        let operations: Vec<_> = match self {
            Self::Leaves(leaves) => leaves
                .into_iter()
                .map(|leaf| {
                    let (placeholder, new_keys) = common::add_placeholder(keys, &leaf);
                    let expression_attribute_names =
                        collections::HashMap::from([(placeholder, leaf)]);
                    common::ExpressionInput {
                        expression: new_keys.join("."),
                        expression_attribute_names,
                        ..Default::default()
                    }
                })
                .collect(),
            Self::Node(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let (placeholder, new_keys) = common::add_placeholder(keys, &key);
                    let mut operation = value.get_selection_operation_recursive(&new_keys);
                    operation
                        .expression_attribute_names
                        .insert(placeholder, key);
                    operation
                })
                .collect(),
            Self::Combined(selections) => selections
                .into_iter()
                .map(|selection| selection.get_selection_operation_recursive(keys))
                .collect(),
        };
        common::ExpressionInput::merge(", ", operations)
    }
}
