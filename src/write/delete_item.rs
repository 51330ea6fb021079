use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// delete item operation
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    keys: common::Item,
    write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// Deleting a key that holds no item succeeds without effect.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_anime::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     keys: common::key::Keys::record("2018", "Jujutsu Kaisen"),
///     write_args: write::common::WriteArgs {
///         table_name: "anime".to_string(),
///         ..Default::default()
///     },
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct DeleteItem<T> {
    /// The primary key of the item to delete.
    pub keys: common::key::Keys<T>,
    /// Additional write operation arguments (table name, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<DeleteItem<T>> for DeleteItemInput {
    type Error = Error;

    fn try_from(delete_item: DeleteItem<T>) -> Result<Self> {
        let keys = delete_item.keys.try_into()?;
        let operation = Self {
            keys,
            write_operation: delete_item.write_args.into(),
        };
        Ok(operation)
    }
}

impl<T: Serialize> DeleteItem<T> {
    /// Execute the delete item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.delete_item().set_key(Some(delete_item.keys));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}
