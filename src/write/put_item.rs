use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation};

/// put item operation
#[derive(Debug, PartialEq)]
struct PutItemInput {
    item: common::Item,
    write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// The item is written unconditionally, replacing any item with the same primary key.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_anime::{model, write};
/// use rust_decimal::Decimal;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let record = model::Record::new("2018", "Jujutsu Kaisen", 2018, Decimal::new(85, 1));
/// let put_item = write::put_item::PutItem {
///     item: (&record).into(),
///     write_args: write::common::WriteArgs {
///         table_name: "anime".to_string(),
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
    pub item: common::Item,
    /// Additional write operation arguments (table name, return values).
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
