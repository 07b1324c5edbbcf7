//! Database records as returned by the Notion query endpoint.
//!
//! Property values are decoded into a closed set of variants. Anything the
//! mapper does not understand (other property types, malformed payloads)
//! becomes [`Property::Unrecognized`] instead of failing the whole record.

use serde::Deserialize;
use std::collections::HashMap;

/// One page row of a database query result
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub url: String,
    pub properties: HashMap<String, Property>,
}

impl Record {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }
}

/// A decoded property value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Property {
    Title(Vec<RichText>),
    Date(Option<DateValue>),
    RichText(Vec<RichText>),
    Unrecognized,
}

/// A run of text inside a title or rich_text property
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// The payload of a date property
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateValue {
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    /// IANA zone for datetimes written without an offset
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Wire shape of a property, tagged by its `type` field
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawProperty {
    Title { title: Vec<RichText> },
    Date { date: Option<DateValue> },
    RichText { rich_text: Vec<RichText> },
    #[serde(other)]
    Other,
}

impl From<serde_json::Value> for Property {
    fn from(value: serde_json::Value) -> Self {
        match serde_json::from_value::<RawProperty>(value) {
            Ok(RawProperty::Title { title }) => Property::Title(title),
            Ok(RawProperty::Date { date }) => Property::Date(date),
            Ok(RawProperty::RichText { rich_text }) => Property::RichText(rich_text),
            Ok(RawProperty::Other) | Err(_) => Property::Unrecognized,
        }
    }
}

/// Concatenate the plain text of all runs.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|t| t.plain_text.as_str()).collect()
}
