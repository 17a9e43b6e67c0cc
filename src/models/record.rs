// src/models/record.rs

//! Bid record data structure.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Column names as they appear on the wire and in exported CSV headers.
pub const FIELD_NAMES: [&str; 7] = [
    "Bid Number",
    "Items",
    "Quantity",
    "Department",
    "Start Date",
    "End Date",
    "Downloadable File URL",
];

/// One scraped bid listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Bid number
    #[serde(rename = "Bid Number", default, deserialize_with = "lenient_string")]
    pub id: String,

    /// Free-text item description
    #[serde(rename = "Items", default, deserialize_with = "lenient_string")]
    pub items: String,

    /// Requested quantity
    #[serde(rename = "Quantity", default)]
    pub quantity: Quantity,

    /// Issuing department
    #[serde(rename = "Department", default, deserialize_with = "lenient_string")]
    pub department: String,

    /// Start of the validity window, `DD-MM-YYYY hh:mm AM|PM`
    #[serde(rename = "Start Date", default, deserialize_with = "lenient_string")]
    pub start_date: String,

    /// End of the validity window, `DD-MM-YYYY hh:mm AM|PM`
    #[serde(rename = "End Date", default, deserialize_with = "lenient_string")]
    pub end_date: String,

    /// Link to the bid document
    #[serde(
        rename = "Downloadable File URL",
        default,
        deserialize_with = "lenient_string"
    )]
    pub file_url: String,
}

impl Record {
    /// Field values in wire order, as displayed.
    pub fn values(&self) -> [String; 7] {
        [
            self.id.clone(),
            self.items.clone(),
            self.quantity.to_string(),
            self.department.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.file_url.clone(),
        ]
    }

    /// All field values joined by a single space.
    pub fn joined(&self) -> String {
        self.values().join(" ")
    }
}

/// Quantity cell. The backend writes `"Not Available"` for missing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quantity {
    Count(i64),
    Text(String),
}

impl Quantity {
    /// Integer value, parsing numeric text.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Quantity::Count(n) => Some(*n),
            Quantity::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Text(String::new())
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Quantity::Count(n)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Count(n) => write!(f, "{}", n),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Count(n) => serializer.serialize_i64(*n),
            Quantity::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Quantity::Count(i),
                // pandas hands back 5.0 for integer columns that once held NaN
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Quantity::Count(f as i64)
                    }
                    _ => Quantity::Text(n.to_string()),
                },
            },
            Value::String(s) => Quantity::Text(s),
            Value::Null => Quantity::Text(String::new()),
            other => Quantity::Text(other.to_string()),
        })
    }
}

/// Accept strings, numbers, booleans and null for text columns.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
