//! Core types shared by every stage of the pipeline.
//!
//! [`LabeledField`] is what the tokenizer produces, a [`Row`] is one line's
//! worth of them, and a [`Record`] is the classified output handed to the
//! encoder.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::severity::Severity;

/// One `label:value` pair from an LTSV line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabeledField {
    pub label: String,
    pub value: String,
}

impl LabeledField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Overwrite both strings in place, keeping their allocations.
    pub(crate) fn assign(&mut self, label: &str, value: &str) {
        self.label.clear();
        self.label.push_str(label);
        self.value.clear();
        self.value.push_str(value);
    }
}

/// All fields of one input line, in input order.
pub type Row = [LabeledField];

/// Attribute bucket: every label that is not a distinguished one.
pub type Attributes = HashMap<String, String>;

/// A single entry of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Timestamp(DateTime<FixedOffset>),
    Severity(Severity),
    String(String),
    Tags(Vec<String>),
    Attributes(Attributes),
}

impl Value {
    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_severity(&self) -> Option<Severity> {
        match self {
            Value::Severity(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&[String]> {
        match self {
            Value::Tags(tags) => Some(tags),
            _ => None,
        }
    }

    pub fn as_attributes(&self) -> Option<&Attributes> {
        match self {
            Value::Attributes(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// The classified form of one LTSV line, keyed by output field name.
///
/// After a successful classification the record always holds the timestamp,
/// severity, body and attributes entries, plus `<tag>s` when the line carried
/// at least one tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry but keep the table's capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
