//! JSON records as returned by the transit API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying a record's hyperlink, used as the default join key.
pub const URL_FIELD: &str = "url";

/// One JSON object representing a line, station or schedule row.
///
/// Records are kept as loose field maps rather than typed structs: the
/// backend serializes whole models and the views only read a few fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// An ordered list of records from one listing.
pub type Collection = Vec<Record>;

impl Record {
    /// Convert a JSON value into a record.
    ///
    /// Returns `None` if the value is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Get a field value if it is a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// The record's hyperlink, if present.
    pub fn url(&self) -> Option<&str> {
        self.get_str(URL_FIELD)
    }

    /// The record's display name, if present.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_accepts_objects_only() {
        assert!(Record::from_value(json!({"url": "/l/1"})).is_some());
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("Red")).is_none());
        assert!(Record::from_value(Value::Null).is_none());
    }

    #[test]
    fn accessors() {
        let record = Record::from_value(json!({
            "url": "http://api/lines/1/",
            "name": "Red",
            "id": 1
        }))
        .unwrap();

        assert_eq!(record.url(), Some("http://api/lines/1/"));
        assert_eq!(record.name(), Some("Red"));
        assert_eq!(record.get("id"), Some(&json!(1)));
        assert_eq!(record.get_str("id"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn deserializes_transparently() {
        let records: Collection =
            serde_json::from_value(json!([{"url": "/s/1"}, {"url": "/s/2"}])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].url(), Some("/s/2"));
    }
}
