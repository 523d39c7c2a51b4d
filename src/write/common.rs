use crate::common;

use aws_sdk_dynamodb::types;
use std::collections;

/// Internal representation of write operation parameters.
///
/// This holds the processed write operation parameters after conversion from
/// the public `WriteArgs` type: the resolved condition expression and the
/// attribute mappings ready for DynamoDB API calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WriteInput {
    pub(crate) condition_expression: Option<String>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
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

/// Arguments common to all write operations (Put, Update, Delete).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// Condition that must hold for the operation to succeed.
    ///
    /// If the condition is false, the operation fails with a conditional check error.
    pub condition: Option<common::condition::KeyCondition>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl From<WriteArgs> for WriteInput {
    fn from(write_args: WriteArgs) -> Self {
        let mut operation = Self {
            table_name: write_args.table_name,
            ..Default::default()
        };
        if let Some(condition) = write_args.condition {
            let condition_expression = operation.merge_expression(condition.into());
            operation.condition_expression = Some(condition_expression);
        }
        operation
    }
}

/// apply common write operation settings to a builder
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_operation:expr) => {
        $builder
            .set_condition_expression($write_operation.condition_expression)
            .set_expression_attribute_names($write_operation.expression_attribute_names)
            .set_expression_attribute_values($write_operation.expression_attribute_values)
            .table_name($write_operation.table_name)
    };
}
