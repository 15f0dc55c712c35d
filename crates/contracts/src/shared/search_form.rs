//! Wire format of the persisted search form state.
//!
//! A snapshot is stored in the browser's `localStorage` under
//! `searchForm_<page path>` as a JSON object mapping element id to either a
//! string (text inputs, selects) or a boolean (checkboxes).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Prefix of every snapshot key in storage.
pub const SEARCH_FORM_KEY_PREFIX: &str = "searchForm_";

/// Pages under this path never get their search form restored.
pub const SEARCH_PATH_PREFIX: &str = "/search";

/// Selector of the server-rendered search form.
pub const SEARCH_FORM_SELECTOR: &str = "#search-form";

/// Storage key of the snapshot for `path`.
pub fn storage_key(path: &str) -> String {
    storage_key_with_prefix(SEARCH_FORM_KEY_PREFIX, path)
}

pub fn storage_key_with_prefix(prefix: &str, path: &str) -> String {
    format!("{}{}", prefix, path)
}

/// `true` when `path` is `prefix` itself or lies below it.
///
/// `/search` matches `/search` and `/search/anything`, but not `/searching/`.
pub fn is_under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Value of a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input or select
    Text(String),
    /// Checkbox
    Checked(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Checked(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed search form snapshot: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to serialize search form snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Field values of one search form, in the order the fields were scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    fields: Vec<(String, FieldValue)>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `id`, keeping its original position if already present.
    pub fn insert(&mut self, id: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let id = id.into();
        match self.fields.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((id, value));
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Serialize)
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(raw).map_err(SnapshotError::Malformed)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut snapshot = FormSnapshot::new();
        for (id, value) in iter {
            snapshot.insert(id, value);
        }
        snapshot
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (id, value) in &self.fields {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

struct FormSnapshotVisitor;

impl<'de> Visitor<'de> for FormSnapshotVisitor {
    type Value = FormSnapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of string or boolean field values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut snapshot = FormSnapshot::new();
        while let Some((id, value)) = access.next_entry::<String, FieldValue>()? {
            snapshot.insert(id, value);
        }
        Ok(snapshot)
    }
}

impl<'de> Deserialize<'de> for FormSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FormSnapshotVisitor)
    }
}
