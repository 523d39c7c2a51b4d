use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation};

/// put item operation
#[derive(Debug, PartialEq)]
struct PutItemInput {
    item: common::Record,
    write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types::AttributeValue};
/// use gearbox_catalog::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: common::Record::from([
///         ("PK".to_string(), AttributeValue::S("gearbox#GB-001".to_string())),
///         ("SK".to_string(), AttributeValue::S("metadata".to_string())),
///     ]),
///     write_args: write::common::WriteArgs {
///         table_name: "gearbox_catalog".to_string(),
///         ..Default::default()
///     },
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct PutItem {
    /// The item to put into the table.
    pub item: common::Record,
    /// Additional write operation arguments (table name, condition).
    pub write_args: write::common::WriteArgs,
}

impl From<PutItem> for PutItemInput {
    fn from(put_item: PutItem) -> Self {
        Self {
            item: put_item.item,
            write_operation: put_item.write_args.into(),
        }
    }
}

impl PutItem {
    /// Execute the put item operation.
    #[tracing::instrument(name = "gearbox_catalog.put_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put_item: PutItemInput = self.into();
        let builder = client.put_item().set_item(Some(put_item.item));
        crate::apply_write_operation!(builder, put_item.write_operation)
            .send()
            .await
    }
}
