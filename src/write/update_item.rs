use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// Placeholder prefix for assigned attributes.
const SET_PREFIX: &str = "set";

/// Field-level assignments applied by a SET update expression.
///
/// Each attribute is overwritten as a whole; nested paths are not supported.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use gearbox_catalog::write::update_item;
///
/// let assignments = update_item::Assignments(vec![
///     ("price_range".to_string(), AttributeValue::S("medium".to_string())),
///     ("torque_rating".to_string(), AttributeValue::N("4500".to_string())),
/// ]);
/// assert_eq!(assignments.names(), vec!["price_range", "torque_rating"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignments(pub Vec<(String, types::AttributeValue)>);

impl Assignments {
    /// Names of the assigned attributes, in assignment order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Whether there is nothing to assign.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Assignments> for common::ExpressionInput {
    fn from(assignments: Assignments) -> Self {
        let operations = assignments
            .0
            .into_iter()
            .enumerate()
            .map(|(index, (name, value))| {
                let (name_placeholder, value_placeholder) =
                    common::indexed_placeholders(SET_PREFIX, index);
                Self {
                    expression: format!("{name_placeholder} = {value_placeholder}"),
                    expression_attribute_names: collections::HashMap::from([(
                        name_placeholder,
                        name,
                    )]),
                    expression_attribute_values: collections::HashMap::from([(
                        value_placeholder,
                        value,
                    )]),
                }
            })
            .collect();
        let mut operation = Self::merge(", ", operations);
        operation.expression = format!("SET {}", operation.expression);
        operation
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    keys: common::Record,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::AttributeValue};
/// use gearbox_catalog::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     keys: common::key::Keys::new(common::key::ItemKind::Gearbox, "GB-001"),
///     assignments: write::update_item::Assignments(vec![
///         ("price_range".to_string(), AttributeValue::S("medium".to_string())),
///     ]),
///     write_args: write::common::WriteArgs {
///         table_name: "gearbox_catalog".to_string(),
///         ..Default::default()
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem {
    /// The primary key of the item to update.
    pub keys: common::key::Keys,
    /// The attributes to overwrite.
    pub assignments: Assignments,
    /// Additional write operation arguments (table name, condition).
    pub write_args: write::common::WriteArgs,
}

impl From<UpdateItem> for UpdateItemInput {
    fn from(update_item: UpdateItem) -> Self {
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let update_expression = write_operation.merge_expression(update_item.assignments.into());
        Self {
            keys: update_item.keys.into(),
            update_expression,
            write_operation,
        }
    }
}

impl UpdateItem {
    /// Execute the update item operation.
    #[tracing::instrument(name = "gearbox_catalog.update_item", skip_all, fields(keys = %self.keys), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.into();
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
    #[case::single(
        Assignments(
            vec![
                (
                    "price_range".to_string(),
                    types::AttributeValue::S(
                        "low".to_string()
                    )
                ),
            ]
        ),
        common::ExpressionInput {
            expression: "SET #set0 = :set0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "price_range".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "low".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::multiple(
        Assignments(
            vec![
                (
                    "torque_rating".to_string(),
                    types::AttributeValue::N(
                        "4500".to_string()
                    )
                ),
                (
                    "model name".to_string(),
                    types::AttributeValue::S(
                        "PowerMax 5500".to_string()
                    )
                ),
            ]
        ),
        common::ExpressionInput {
            expression: "SET #set0 = :set0, #set1 = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "torque_rating".to_string()),
                    ("#set1".to_string(), "model name".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::N(
                            "4500".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::S(
                            "PowerMax 5500".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    fn test_assignments(#[case] assignments: Assignments, #[case] expected: common::ExpressionInput) {
        let actual: common::ExpressionInput = assignments.into();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_update_item() {
        let update_item = UpdateItem {
            keys: common::key::Keys::new(common::key::ItemKind::Gearbox, "GB-001"),
            assignments: Assignments(vec![(
                "updated_at".to_string(),
                types::AttributeValue::S("2025-08-17T12:05:00Z".to_string()),
            )]),
            write_args: write::common::WriteArgs {
                condition: Some(common::condition::KeyCondition {
                    condition: common::condition::Condition::Exists,
                    name: "PK".to_string(),
                }),
                table_name: "gearbox_catalog".to_string(),
            },
        };
        let expected = UpdateItemInput {
            keys: common::key::Keys::new(common::key::ItemKind::Gearbox, "GB-001").into(),
            update_expression: "SET #set0 = :set0".to_string(),
            write_operation: write::common::WriteInput {
                condition_expression: Some("attribute_exists(#PK)".to_string()),
                expression_attribute_names: Some(collections::HashMap::from([
                    ("#PK".to_string(), "PK".to_string()),
                    ("#set0".to_string(), "updated_at".to_string()),
                ])),
                expression_attribute_values: Some(collections::HashMap::from([(
                    ":set0".to_string(),
                    types::AttributeValue::S("2025-08-17T12:05:00Z".to_string()),
                )])),
                table_name: "gearbox_catalog".to_string(),
            },
        };
        let actual: UpdateItemInput = update_item.into();
        assert_eq!(actual, expected);
    }
}
