//! Key-to-record lookup tables.
//!
//! An [`Index`] is built from exactly one collection and maps the string
//! value of a chosen field to the record carrying it. Duplicate keys are
//! last-write-wins: the later record in iteration order replaces the earlier
//! one without complaint.
//!
//! Records whose key field is missing, or holds something other than a
//! string or number, are left out of the index and counted in
//! [`Index::skipped`].

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use super::record::Record;

/// Lookup table from key value to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    entries: HashMap<String, Record>,
    skipped: usize,
}

impl Index {
    /// Look up a record by key.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.entries.get(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of input records left out because they had no usable key.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Extract the join key of a record.
///
/// Strings are used as-is and numbers by their JSON text (`7` → `"7"`).
/// Anything else, including a missing field, yields `None`.
pub fn record_key(record: &Record, key_field: &str) -> Option<String> {
    match record.get(key_field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Build an index over `records` keyed by `key_field`.
///
/// The input is not modified. Later records win on duplicate keys.
pub fn index(records: &[Record], key_field: &str) -> Index {
    let mut entries = HashMap::with_capacity(records.len());
    let mut skipped = 0;

    for (position, record) in records.iter().enumerate() {
        match record_key(record, key_field) {
            Some(key) => {
                entries.insert(key, record.clone());
            }
            None => {
                warn!(position, key_field, "record has no usable key, excluded from index");
                skipped += 1;
            }
        }
    }

    Index { entries, skipped }
}
