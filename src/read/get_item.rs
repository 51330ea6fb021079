use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// get item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    keys: common::Item,
    single_read_operation: read::common::SingleReadInput,
}

/// Get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_anime::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     keys: common::key::Keys::record("2018", "Jujutsu Kaisen"),
///     single_read_args: read::common::SingleReadArgs {
///         table_name: "anime".to_string(),
///         ..Default::default()
///     },
/// };
/// get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<T> {
    /// The primary key of the item to retrieve.
    pub keys: common::key::Keys<T>,
    /// Additional read operation arguments (table name, consistent read).
    pub single_read_args: read::common::SingleReadArgs,
}

impl<T: Serialize> TryFrom<GetItem<T>> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem<T>) -> Result<Self> {
        let single_read_operation: read::common::SingleReadInput = get_item.single_read_args.into();
        let keys = get_item.keys.try_into()?;
        let operation = Self {
            keys,
            single_read_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize> GetItem<T> {
    /// Execute the get item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.get_item().set_key(Some(get_item.keys));
        crate::apply_single_read_operation!(builder, get_item.single_read_operation)
            .send()
            .await
    }
}
