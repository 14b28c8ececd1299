//! Per-occurrence overrides and deletions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entry::EntryId;

/// Partial entry update carried by a modification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
    /// Date override; replaces the occurrence date when set on an immediate payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Patch {
    pub fn deletion() -> Self {
        Self {
            deleted: true,
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Layers `other` on top of `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Patch) {
        self.deleted |= other.deleted;
        if other.date.is_some() {
            self.date = other.date;
        }
        for (key, value) in &other.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// Targets the `index`-th occurrence (1-based) of the entry `item_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modification {
    pub item_id: EntryId,
    pub index: u32,
    /// Applies to this occurrence only.
    #[serde(default)]
    pub payload: Patch,
    /// Applies to this occurrence and every later one of the same entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_payload: Option<Patch>,
}

impl Modification {
    pub fn new(item_id: impl Into<EntryId>, index: u32, payload: Patch) -> Self {
        Self {
            item_id: item_id.into(),
            index,
            payload,
            rest_payload: None,
        }
    }

    pub fn with_rest(mut self, rest: Patch) -> Self {
        self.rest_payload = Some(rest);
        self
    }

    /// Whether this modification removes its occurrence.
    pub fn deletes(&self) -> bool {
        self.payload.deleted || self.deletes_rest()
    }

    /// Whether this modification removes its occurrence and all later ones.
    pub fn deletes_rest(&self) -> bool {
        self.rest_payload.as_ref().is_some_and(|rest| rest.deleted)
    }
}
