use crate::common;

use aws_sdk_dynamodb::types;
use std::collections;

/// Internal representation of write operation parameters.
///
/// Holds the resolved attribute maps ready for the DynamoDB API call. The maps stay `None`
/// until an expression contributes to them.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WriteInput {
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) return_values: Option<types::ReturnValue>,
    pub(crate) table_name: String,
}

impl WriteInput {
    /// Merge an expression operation into this write operation.
    pub(crate) fn merge_expression(&mut self, operation: common::ExpressionInput) -> String {
        operation.merge_into(
            &mut self.expression_attribute_names,
            &mut self.expression_attribute_values,
        )
    }
}

/// Arguments common to the single-item write operations (Put, Update, Delete).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// Which item attributes to return in the response.
    ///
    /// Options: `AllOld`, `AllNew`, `UpdatedOld`, `UpdatedNew`, or `None`.
    pub return_values: Option<types::ReturnValue>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl From<WriteArgs> for WriteInput {
    fn from(write_args: WriteArgs) -> Self {
        Self {
            return_values: write_args.return_values,
            table_name: write_args.table_name,
            ..Default::default()
        }
    }
}

/// apply common write operation settings to a builder
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_operation:expr) => {
        $builder
            .set_expression_attribute_names($write_operation.expression_attribute_names)
            .set_expression_attribute_values($write_operation.expression_attribute_values)
            .set_return_values($write_operation.return_values)
            .table_name($write_operation.table_name)
    };
}
