//! FILENAME: core/dataset/src/row.rs
//! PURPOSE: Rows and the ordered dataset they belong to.
//! CONTEXT: A row maps field names to values. Rows are not required to carry
//! every field named in the header; a missing field is simply absent.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// A single record: field name -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: FxHashMap<String, FieldValue>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            fields: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Row {
            fields: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the value for `field`, or `None` when the row lacks it.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(field.into(), value)
    }

    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, FieldValue::Text(value.into()));
        self
    }

    pub fn with_number(mut self, field: impl Into<String>, value: f64) -> Self {
        self.insert(field, FieldValue::Number(value));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in arbitrary order. Use the dataset headers for order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (field, value) in iter {
            row.insert(field, value);
        }
        row
    }
}

/// The ordered result of ingestion: header names plus rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Dataset { headers, rows }
    }

    /// Field names in the order they appeared in the source header.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.headers.iter().any(|h| h == field)
    }
}
