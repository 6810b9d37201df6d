//! Raw and resolved value types for form intake.
//!
//! Form input arrives loosely typed: every field is either a piece of text
//! or a flag, and a field that was not submitted is simply absent from the
//! mapping. [`RawValue`] keeps that distinction explicit so checkbox and
//! date handling stay exhaustive instead of stringly-typed.

use std::collections::BTreeMap;
use std::collections::btree_map;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scalar as submitted by the caller, before any transformation.
///
/// Absence is modeled by absence from [`RawInput`], not by a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Free-form text, including empty strings and falsy-looking values
    /// such as `"0"`.
    Text(String),
    /// A boolean submitted as an actual boolean (e.g. from a JSON body).
    Flag(bool),
}

impl RawValue {
    /// The text content, if this value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) => None,
        }
    }

    /// Render the value the way a form encoder would.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Flag(flag) => flag.to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for RawValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

/// A resolved, application-ready value produced by field resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text passed through verbatim.
    Text(String),
    /// A flag, typically a resolved checkbox state.
    Flag(bool),
    /// A parsed calendar date.
    Date(NaiveDate),
    /// No value, e.g. a date field submitted as the empty string.
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<RawValue> for FieldValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Text(text) => Self::Text(text),
            RawValue::Flag(flag) => Self::Flag(flag),
        }
    }
}

/// The unmodified field-name-to-value mapping supplied by the caller.
///
/// Fields may be added or removed after construction, e.g. to inject a
/// computed value before the transformation pass runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput {
    fields: BTreeMap<String, RawValue>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|key| key.as_str())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, RawValue> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawInput
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
