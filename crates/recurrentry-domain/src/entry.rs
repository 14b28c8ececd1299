//! Caller-owned entries that recurrence rules are attached to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{modification::Patch, recurrence::RecurrenceConfig};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
/// Stable identity of an entry, either numeric or textual.
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(value) => write!(f, "{value}"),
            EntryId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        EntryId::Number(value)
    }
}

impl From<i32> for EntryId {
    fn from(value: i32) -> Self {
        EntryId::Number(i64::from(value))
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId::Text(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        EntryId::Text(value)
    }
}

impl From<Uuid> for EntryId {
    fn from(value: Uuid) -> Self {
        EntryId::Text(value.to_string())
    }
}

/// An entry with an optional recurrence rule and an opaque payload.
///
/// Everything other than `id`, `date` and `config` lives in `fields`; the
/// engine only ever shallow-merges it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Occurrence date used when no recurrence is configured.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RecurrenceConfig>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Entry {
    pub fn new(id: impl Into<EntryId>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            config: None,
            fields: Map::new(),
        }
    }

    pub fn with_config(mut self, config: RecurrenceConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Shallow-merges a patch: its date replaces `date`, its fields overwrite ours.
    pub fn apply(&mut self, patch: &Patch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        for (key, value) in &patch.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}
