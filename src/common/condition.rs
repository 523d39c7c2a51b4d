use crate::common;

use std::collections;

/// Existence condition for conditional writes.
///
/// ```rust
/// use gearbox_catalog::common::condition;
///
/// let condition = condition::KeyCondition {
///     name: "PK".to_string(),
///     condition: condition::Condition::NotExists,
/// };
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Condition {
    /// Checks if the attribute exists, i.e. the item is already stored.
    Exists,
    /// Checks if the attribute does not exist, i.e. the item is not stored yet.
    NotExists,
}

impl Condition {
    fn get_expression(self, key_placeholder: &str) -> String {
        match self {
            Self::Exists => format!("attribute_exists({key_placeholder})"),
            Self::NotExists => format!("attribute_not_exists({key_placeholder})"),
        }
    }
}

/// Condition applied to an attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyCondition {
    /// The condition to apply to the attribute.
    pub condition: Condition,
    /// The name of the attribute to apply the condition to.
    pub name: String,
}

impl From<KeyCondition> for common::ExpressionInput {
    fn from(key_condition: KeyCondition) -> Self {
        let placeholder = format!("#{}", key_condition.name);
        let expression = key_condition.condition.get_expression(&placeholder);
        Self {
            expression,
            expression_attribute_names: collections::HashMap::from([(
                placeholder,
                key_condition.name,
            )]),
            expression_attribute_values: collections::HashMap::new(),
        }
    }
}
