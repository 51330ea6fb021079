use crate::common;

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

const AND: &str = " AND ";

/// Comparison applied to a single attribute.
///
/// ```rust
/// use dynamodb_anime::common::condition;
///
/// let eq = condition::Condition::Equals("2018".to_string());
/// let range = condition::Condition::Between("2010".to_string(), "2020".to_string());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Condition<T> {
    /// The attribute lies between the two values, both ends inclusive.
    Between(T, T),
    /// The attribute equals the value.
    Equals(T),
}

impl<T: Serialize> Condition<T> {
    fn get_expression(
        self,
        key: &str,
        key_placeholder: &str,
        index: &mut usize,
    ) -> Result<(String, collections::HashMap<String, types::AttributeValue>)> {
        let mut expression_attribute_values = collections::HashMap::new();
        let expression = match self {
            Self::Between(low, high) => {
                let low = to_attribute_value(low)?;
                let high = to_attribute_value(high)?;
                let low_placeholder = format!(":{key}_between{index}");
                *index += 1;
                let high_placeholder = format!(":{key}_between{index}");
                *index += 1;
                let expression =
                    format!("{key_placeholder} BETWEEN {low_placeholder} AND {high_placeholder}");
                expression_attribute_values.insert(low_placeholder, low);
                expression_attribute_values.insert(high_placeholder, high);
                expression
            }
            Self::Equals(value) => {
                let value = to_attribute_value(value)?;
                let value_placeholder = format!(":{key}_eq{index}");
                *index += 1;
                let expression = format!("{key_placeholder} = {value_placeholder}");
                expression_attribute_values.insert(value_placeholder, value);
                expression
            }
        };
        Ok((expression, expression_attribute_values))
    }
}

/// Condition applied to a named attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition<T> {
    /// The condition to apply to the attribute.
    pub condition: Condition<T>,
    /// The name of the attribute to apply the condition to.
    pub name: String,
}

impl<T: Serialize> KeyCondition<T> {
    /// Key condition expression: every condition must hold.
    pub(crate) fn get_expression_operation(keys: Vec<Self>) -> Result<common::ExpressionInput> {
        ConditionMap::Leaves(keys).try_into()
    }
}

/// Conditions that must all hold, used as a filter expression.
///
/// ```rust
/// use dynamodb_anime::common::condition;
///
/// let map = condition::ConditionMap::Leaves(vec![condition::KeyCondition {
///     name: "category".to_string(),
///     condition: condition::Condition::Between("2010".to_string(), "2020".to_string()),
/// }]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionMap<T> {
    /// Flat list of conditions joined with `AND`.
    Leaves(Vec<KeyCondition<T>>),
}

impl<T: Serialize> TryFrom<ConditionMap<T>> for common::ExpressionInput {
    type Error = Error;

    fn try_from(condition_map: ConditionMap<T>) -> Result<Self> {
        let ConditionMap::Leaves(key_conditions) = condition_map;
        let mut index = 0;
        let mut operations = Vec::with_capacity(key_conditions.len());
        for key_condition in key_conditions {
            let (placeholder, _) = common::add_placeholder(&[], &key_condition.name);
            let (expression, expression_attribute_values) = key_condition.condition.get_expression(
                &key_condition.name,
                &placeholder,
                &mut index,
            )?;
            let expression_attribute_names =
                collections::HashMap::from([(placeholder, key_condition.name)]);
            operations.push(common::ExpressionInput {
                expression,
                expression_attribute_names,
                expression_attribute_values,
            });
        }
        Ok(common::ExpressionInput::merge(AND, operations))
    }
}
