//! The anime record stored in the table and its DynamoDB item encoding.
//!
//! Items are encoded by hand so that `info.rating` travels as the exact decimal
//! text of a [`Decimal`], never through a binary float.

use crate::common::{self, key};
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types::AttributeValue;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::{collections, fmt, str::FromStr};

/// Nested map attribute holding the mutable record details.
pub const INFO: &str = "info";
/// Release year inside [`INFO`].
pub const YEAR: &str = "year";
/// Rating inside [`INFO`].
pub const RATING: &str = "rating";

/// Mutable details of a record.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Info {
    /// Release year.
    pub year: i32,
    /// Rating, kept fixed-point.
    pub rating: Decimal,
}

/// An anime record, identified by `(category, title)`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Record {
    /// Partition key; usually the release year as text.
    #[serde(deserialize_with = "category_from_json")]
    pub category: String,
    /// Sort key.
    pub title: String,
    /// Year and rating.
    pub info: Info,
}

impl Record {
    /// Create a record from its parts.
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        year: i32,
        rating: Decimal,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            info: Info { year, rating },
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, category {}): rating {}",
            self.title, self.info.year, self.category, self.info.rating
        )
    }
}

/// Seed files carry the category either as a string or as a bare year number.
fn category_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(category) => Ok(category),
        serde_json::Value::Number(category) => Ok(category.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or an integer category, found {other}"
        ))),
    }
}

/// The projection returned by the category range scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordSummary {
    /// Partition key.
    pub category: String,
    /// Sort key.
    pub title: String,
    /// `info.rating`, absent when the item has none.
    pub rating: Option<Decimal>,
}

impl fmt::Display for RecordSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rating {
            Some(rating) => write!(f, "{} (category {}): rating {rating}", self.title, self.category),
            None => write!(f, "{} (category {}): unrated", self.title, self.category),
        }
    }
}

/// Attributes reported back by an update in "updated new" mode.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UpdatedInfo {
    /// New release year, when it was returned.
    pub year: Option<i32>,
    /// New rating, when it was returned.
    pub rating: Option<Decimal>,
}

impl From<&Record> for common::Item {
    fn from(record: &Record) -> Self {
        let info = collections::HashMap::from([
            (
                YEAR.to_string(),
                AttributeValue::N(record.info.year.to_string()),
            ),
            (
                RATING.to_string(),
                AttributeValue::N(record.info.rating.to_string()),
            ),
        ]);
        collections::HashMap::from([
            (
                key::CATEGORY.to_string(),
                AttributeValue::S(record.category.clone()),
            ),
            (key::TITLE.to_string(), AttributeValue::S(record.title.clone())),
            (INFO.to_string(), AttributeValue::M(info)),
        ])
    }
}

impl TryFrom<&common::Item> for Record {
    type Error = Error;

    fn try_from(item: &common::Item) -> Result<Self> {
        let info = get_map(item, INFO)?;
        Ok(Self {
            category: get_string(item, key::CATEGORY)?,
            title: get_string(item, key::TITLE)?,
            info: Info {
                year: get_number(info, YEAR)?,
                rating: get_number(info, RATING)?,
            },
        })
    }
}

impl TryFrom<&common::Item> for RecordSummary {
    type Error = Error;

    fn try_from(item: &common::Item) -> Result<Self> {
        let rating = match get_optional_map(item, INFO)? {
            Some(info) => get_optional_number(info, RATING)?,
            None => None,
        };
        Ok(Self {
            category: get_string(item, key::CATEGORY)?,
            title: get_string(item, key::TITLE)?,
            rating,
        })
    }
}

impl TryFrom<&common::Item> for UpdatedInfo {
    type Error = Error;

    fn try_from(attributes: &common::Item) -> Result<Self> {
        match get_optional_map(attributes, INFO)? {
            Some(info) => Ok(Self {
                year: get_optional_number(info, YEAR)?,
                rating: get_optional_number(info, RATING)?,
            }),
            None => Ok(Self::default()),
        }
    }
}

/// Get a required string attribute.
fn get_string(item: &common::Item, key: &str) -> Result<String> {
    match item.get(key) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(_) => Err(Error::malformed(key, "expected a string")),
        None => Err(Error::malformed(key, "missing")),
    }
}

/// Get a required map attribute.
fn get_map<'a>(item: &'a common::Item, key: &str) -> Result<&'a common::Item> {
    get_optional_map(item, key)?.ok_or_else(|| Error::malformed(key, "missing"))
}

fn get_optional_map<'a>(item: &'a common::Item, key: &str) -> Result<Option<&'a common::Item>> {
    match item.get(key) {
        Some(AttributeValue::M(value)) => Ok(Some(value)),
        Some(_) => Err(Error::malformed(key, "expected a map")),
        None => Ok(None),
    }
}

/// Get a required number attribute, parsed from its exact decimal text.
fn get_number<T>(item: &common::Item, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    get_optional_number(item, key)?.ok_or_else(|| Error::malformed(key, "missing"))
}

fn get_optional_number<T>(item: &common::Item, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match item.get(key) {
        Some(AttributeValue::N(value)) => value
            .parse()
            .map(Some)
            .map_err(|e| Error::malformed(key, format!("invalid number {value:?}: {e}"))),
        Some(_) => Err(Error::malformed(key, "expected a number")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn info(year: &str, rating: &str) -> AttributeValue {
        AttributeValue::M(collections::HashMap::from([
            (YEAR.to_string(), AttributeValue::N(year.to_string())),
            (RATING.to_string(), AttributeValue::N(rating.to_string())),
        ]))
    }

    fn item(entries: Vec<(&str, AttributeValue)>) -> common::Item {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn test_record_to_item() {
        let record = Record::new("2018", "Jujutsu Kaisen", 2020, Decimal::new(85, 1));
        let actual: common::Item = (&record).into();
        let expected = item(vec![
            ("category", AttributeValue::S("2018".to_string())),
            ("title", AttributeValue::S("Jujutsu Kaisen".to_string())),
            ("info", info("2020", "8.5")),
        ]);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_record_round_trips_exact_rating() {
        let record = Record::new("2018", "Jujutsu Kaisen", 2020, Decimal::from_str("8.10").unwrap());
        let item: common::Item = (&record).into();
        let actual = Record::try_from(&item).unwrap();
        assert_eq!(actual, record);
        assert_eq!(actual.info.rating.to_string(), "8.10");
    }

    #[rstest]
    #[case::missing_title(
        item(vec![
            ("category", AttributeValue::S("2018".to_string())),
            ("info", info("2020", "8.5")),
        ]),
        "title"
    )]
    #[case::category_not_string(
        item(vec![
            ("category", AttributeValue::N("2018".to_string())),
            ("title", AttributeValue::S("a".to_string())),
            ("info", info("2020", "8.5")),
        ]),
        "category"
    )]
    #[case::missing_info(
        item(vec![
            ("category", AttributeValue::S("2018".to_string())),
            ("title", AttributeValue::S("a".to_string())),
        ]),
        "info"
    )]
    #[case::unparsable_rating(
        item(vec![
            ("category", AttributeValue::S("2018".to_string())),
            ("title", AttributeValue::S("a".to_string())),
            ("info", info("2020", "high")),
        ]),
        "rating"
    )]
    #[case::fractional_year(
        item(vec![
            ("category", AttributeValue::S("2018".to_string())),
            ("title", AttributeValue::S("a".to_string())),
            ("info", info("2020.5", "8.5")),
        ]),
        "year"
    )]
    fn test_malformed_record(#[case] item: common::Item, #[case] expected_attribute: &str) {
        match Record::try_from(&item) {
            Err(Error::MalformedItem { attribute, .. }) => assert_eq!(attribute, expected_attribute),
            other => panic!("expected a malformed item error, got {other:?}"),
        }
    }

    #[rstest]
    #[case::with_rating(
        item(vec![
            ("category", AttributeValue::S("2015".to_string())),
            ("title", AttributeValue::S("One Punch Man".to_string())),
            (
                "info",
                AttributeValue::M(collections::HashMap::from([(
                    "rating".to_string(),
                    AttributeValue::N("8.7".to_string()),
                )])),
            ),
        ]),
        RecordSummary {
            category: "2015".to_string(),
            title: "One Punch Man".to_string(),
            rating: Some(Decimal::new(87, 1)),
        }
    )]
    #[case::without_info(
        item(vec![
            ("category", AttributeValue::S("2015".to_string())),
            ("title", AttributeValue::S("One Punch Man".to_string())),
        ]),
        RecordSummary {
            category: "2015".to_string(),
            title: "One Punch Man".to_string(),
            rating: None,
        }
    )]
    fn test_record_summary(#[case] item: common::Item, #[case] expected: RecordSummary) {
        let actual = RecordSummary::try_from(&item).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::both(
        item(vec![("info", info("2019", "9.1"))]),
        UpdatedInfo { year: Some(2019), rating: Some(Decimal::new(91, 1)) }
    )]
    #[case::empty(item(vec![]), UpdatedInfo::default())]
    fn test_updated_info(#[case] attributes: common::Item, #[case] expected: UpdatedInfo) {
        let actual = UpdatedInfo::try_from(&attributes).unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::string_category(
        r#"{"title": "Mob Psycho 100", "category": "2016", "info": {"year": 2016, "rating": 8.6}}"#,
        Record::new("2016", "Mob Psycho 100", 2016, Decimal::new(86, 1))
    )]
    #[case::integer_category(
        r#"{"title": "Mob Psycho 100", "category": 2016, "info": {"year": 2016, "rating": 8.60}}"#,
        Record::new("2016", "Mob Psycho 100", 2016, Decimal::from_str("8.60").unwrap())
    )]
    fn test_record_from_json(#[case] json: &str, #[case] expected: Record) {
        let actual: Record = serde_json::from_str(json).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.info.rating.to_string(), expected.info.rating.to_string());
    }

    #[test]
    fn test_record_from_json_rejects_boolean_category() {
        let json = r#"{"title": "a", "category": true, "info": {"year": 2016, "rating": 8}}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }
}
