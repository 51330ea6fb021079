//! Expression plumbing shared by the read and write request builders.
//!
//! Keys, filter conditions and projections are compiled into DynamoDB expression
//! strings with `#name` and `:value` placeholders, plus the matching attribute
//! name and value maps.

/// Condition expressions for key conditions and filters.
pub mod condition;

/// Primary keys (partition key plus optional sort key).
pub mod key;

/// Attribute selection for projection expressions.
pub mod selection;

use aws_sdk_dynamodb::types;
use std::collections;

/// A raw DynamoDB item.
pub type Item = collections::HashMap<String, types::AttributeValue>;

pub(crate) fn add_placeholder(keys: &[String], identifier: &str) -> (String, Vec<String>) {
    let placeholder = format!("#{identifier}");
    let mut new_keys = Vec::with_capacity(keys.len() + 1);
    new_keys.extend_from_slice(keys);
    new_keys.push(placeholder.clone());
    (placeholder, new_keys)
}

fn join_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// A compiled expression with its placeholder maps.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = join_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> String {
        match names {
            Some(existing) => existing.extend(self.expression_attribute_names),
            None => *names = Some(self.expression_attribute_names),
        }
        if !self.expression_attribute_values.is_empty() {
            match values {
                Some(existing) => existing.extend(self.expression_attribute_values),
                None => *values = Some(self.expression_attribute_values),
            }
        }
        self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::empty_left("", "b", "b")]
    #[case::empty_right("a", "", "a")]
    #[case::both("a", "b", "a, b")]
    fn test_join_expression(#[case] left: &str, #[case] right: &str, #[case] expected: &str) {
        let actual = join_expression(left.to_string(), ", ", right.to_string());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_merge_into_keeps_values_unset_when_empty() {
        let operation = ExpressionInput {
            expression: "#a".to_string(),
            expression_attribute_names: collections::HashMap::from([(
                "#a".to_string(),
                "a".to_string(),
            )]),
            ..Default::default()
        };
        let mut names = None;
        let mut values = None;
        let expression = operation.merge_into(&mut names, &mut values);
        assert_eq!(expression, "#a");
        assert_eq!(
            names,
            Some(collections::HashMap::from([(
                "#a".to_string(),
                "a".to_string()
            )]))
        );
        assert_eq!(values, None);
    }
}
