//! Common utilities for catalog storage.
//!
//! This module provides shared types used across read and write operations,
//! including key handling, condition expressions, and the conversion between
//! tagged attribute values and plain JSON values.

/// Conversion from tagged attribute values to plain JSON values.
pub mod attribute;

/// Existence conditions for conditional writes.
pub mod condition;

/// Key types for identifying catalog items.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// A stored item in its tagged-attribute form.
pub type Record = collections::HashMap<String, types::AttributeValue>;

/// Name and value placeholders for the `index`-th attribute of an expression.
///
/// Attribute names are never inlined so that reserved words and arbitrary
/// caller-supplied field names stay valid inside the expression.
pub(crate) fn indexed_placeholders(prefix: &str, index: usize) -> (String, String) {
    (format!("#{prefix}{index}"), format!(":{prefix}{index}"))
}

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// expression operation
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
            operation.expression = get_expression(operation.expression, operator, item.expression);
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
    #[case::both("a", "b", "a, b")]
    #[case::left_empty("", "b", "b")]
    #[case::right_empty("a", "", "a")]
    fn test_get_expression(#[case] left: &str, #[case] right: &str, #[case] expected: &str) {
        let actual = get_expression(left.to_string(), ", ", right.to_string());
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_merge_into_skips_empty_values() {
        let operation = ExpressionInput {
            expression: "attribute_exists(#PK)".to_string(),
            expression_attribute_names: collections::HashMap::from([(
                "#PK".to_string(),
                "PK".to_string(),
            )]),
            ..Default::default()
        };
        let mut names = None;
        let mut values = None;
        let expression = operation.merge_into(&mut names, &mut values);
        assert_eq!(expression, "attribute_exists(#PK)");
        assert_eq!(
            names,
            Some(collections::HashMap::from([(
                "#PK".to_string(),
                "PK".to_string()
            )]))
        );
        assert_eq!(values, None);
    }
}
