use crate::common;

use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};

/// Attribute name of the record partition key.
pub const CATEGORY: &str = "category";

/// Attribute name of the record sort key.
pub const TITLE: &str = "title";

/// Key component.
///
/// ```rust
/// use dynamodb_anime::common::key;
///
/// let key = key::Key {
///     name: "category".to_string(),
///     value: "2018".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key<T> {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: T,
}

/// Primary key (partition key and optional sort key).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys<T> {
    /// The partition key (required).
    pub partition_key: Key<T>,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key<T>>,
}

impl Keys<String> {
    /// The compound key of a record: `category` as partition key, `title` as sort key.
    pub fn record(category: &str, title: &str) -> Self {
        Self {
            partition_key: Key {
                name: CATEGORY.to_string(),
                value: category.to_string(),
            },
            sort_key: Some(Key {
                name: TITLE.to_string(),
                value: title.to_string(),
            }),
        }
    }
}

impl<T: Serialize> TryFrom<Keys<T>> for common::Item {
    type Error = Error;

    fn try_from(key: Keys<T>) -> Result<Self> {
        let partition_key_value = to_attribute_value(key.partition_key.value)?;
        let mut keys = Self::from([(key.partition_key.name, partition_key_value)]);
        if let Some(sort_key) = key.sort_key {
            let sort_key_value = to_attribute_value(sort_key.value)?;
            keys.insert(sort_key.name, sort_key_value);
        }
        Ok(keys)
    }
}
