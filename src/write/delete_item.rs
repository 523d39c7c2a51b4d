use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation};

/// delete item operation
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    keys: common::Record,
    write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use gearbox_catalog::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     keys: common::key::Keys::new(common::key::ItemKind::Gearbox, "GB-001"),
///     write_args: write::common::WriteArgs {
///         table_name: "gearbox_catalog".to_string(),
///         ..Default::default()
///     },
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct DeleteItem {
    /// The primary key of the item to delete.
    pub keys: common::key::Keys,
    /// Additional write operation arguments (table name, condition).
    pub write_args: write::common::WriteArgs,
}

impl From<DeleteItem> for DeleteItemInput {
    fn from(delete_item: DeleteItem) -> Self {
        Self {
            keys: delete_item.keys.into(),
            write_operation: delete_item.write_args.into(),
        }
    }
}

impl DeleteItem {
    /// Execute the delete item operation.
    #[tracing::instrument(name = "gearbox_catalog.delete_item", skip_all, fields(keys = %self.keys), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.into();
        let builder = client.delete_item().set_key(Some(delete_item.keys));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;
    use std::collections;

    #[rstest]
    #[case::unconditional(
        DeleteItem {
            keys: common::key::Keys::new(common::key::ItemKind::Category, "marine"),
            write_args: write::common::WriteArgs {
                table_name: "c".to_string(),
                ..Default::default()
            },
        },
        DeleteItemInput {
            keys: common::Record::from(
                [
                    (
                        "PK".to_string(),
                        types::AttributeValue::S(
                            "category#marine".to_string()
                        )
                    ),
                    (
                        "SK".to_string(),
                        types::AttributeValue::S(
                            "metadata".to_string()
                        )
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                table_name: "c".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::must_exist(
        DeleteItem {
            keys: common::key::Keys::new(common::key::ItemKind::Gearbox, "GB-001"),
            write_args: write::common::WriteArgs {
                condition: Some(
                    common::condition::KeyCondition {
                        condition: common::condition::Condition::Exists,
                        name: "PK".to_string(),
                    }
                ),
                table_name: "g".to_string(),
            },
        },
        DeleteItemInput {
            keys: common::Record::from(
                [
                    (
                        "PK".to_string(),
                        types::AttributeValue::S(
                            "gearbox#GB-001".to_string()
                        )
                    ),
                    (
                        "SK".to_string(),
                        types::AttributeValue::S(
                            "metadata".to_string()
                        )
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                condition_expression: Some(
                    "attribute_exists(#PK)".to_string()
                ),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#PK".to_string(), "PK".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: None,
                table_name: "g".to_string(),
            },
        }
    )]
    fn test_delete_item(#[case] args: DeleteItem, #[case] expected: DeleteItemInput) {
        let actual: DeleteItemInput = args.into();
        assert_eq!(actual, expected);
    }
}
