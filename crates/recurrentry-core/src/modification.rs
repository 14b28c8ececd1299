//! Per-occurrence modification lookup and verdicts.

use std::collections::HashMap;

use chrono::NaiveDate;
use recurrentry_domain::{EntryId, Modification, Patch, Period};

use crate::adjustment::DateAdjustment;

/// Changes a modification makes to an occurrence it keeps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Amendment {
    /// Rest payload with the immediate payload layered on top.
    pub patch: Patch,
    /// Date override for this occurrence (actual and payment date).
    pub date: Option<NaiveDate>,
    /// Payload merged into every later occurrence of the entry.
    pub carry: Option<Patch>,
    /// Shift re-applied to later computed dates; only set when a date
    /// override comes with a rest payload.
    pub adjustment: Option<DateAdjustment>,
}

/// Outcome of looking up one occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Keep,
    /// Drop this occurrence only.
    Delete,
    /// Drop this occurrence and stop generating for the entry.
    Halt,
    Amend(Amendment),
}

/// Modifications keyed by `(entry id, occurrence index)`, built once per call.
#[derive(Debug, Default)]
pub struct ModificationIndex<'a> {
    by_key: HashMap<(&'a EntryId, u32), &'a Modification>,
    last_date_override: HashMap<&'a EntryId, u32>,
}

impl<'a> ModificationIndex<'a> {
    /// Indexes `modifications`; a later duplicate key replaces an earlier one.
    pub fn new(modifications: &'a [Modification]) -> Self {
        let by_key: HashMap<_, _> = modifications
            .iter()
            .map(|modification| ((&modification.item_id, modification.index), modification))
            .collect();
        let mut last_date_override = HashMap::new();
        for (&(id, index), modification) in &by_key {
            if modification.payload.date.is_some() {
                let last = last_date_override.entry(id).or_insert(index);
                *last = (*last).max(index);
            }
        }
        Self {
            by_key,
            last_date_override,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn get(&self, id: &'a EntryId, index: u32) -> Option<&'a Modification> {
        self.by_key.get(&(id, index)).copied()
    }

    /// Whether entry `id` has a date override at occurrence `index` or later.
    /// Such an override can move a later occurrence back before a range end.
    pub fn has_date_override_from(&self, id: &EntryId, index: u32) -> bool {
        self.last_date_override
            .get(id)
            .is_some_and(|&last| last >= index)
    }

    /// Decides what happens to occurrence `index` of entry `id`, computed on
    /// `computed` for an entry recurring every `period`.
    pub fn verdict(
        &self,
        id: &'a EntryId,
        index: u32,
        computed: NaiveDate,
        period: Period,
    ) -> Verdict {
        match self.get(id, index) {
            Some(modification) => judge(modification, computed, period),
            None => Verdict::Keep,
        }
    }
}

fn judge(modification: &Modification, computed: NaiveDate, period: Period) -> Verdict {
    if modification.deletes_rest() {
        return Verdict::Halt;
    }
    if modification.payload.deleted {
        return Verdict::Delete;
    }

    let rest = modification.rest_payload.as_ref();
    let mut patch = rest.cloned().unwrap_or_default();
    patch.merge(&modification.payload);

    let date = modification.payload.date;
    let adjustment = match (date, rest) {
        (Some(date), Some(_)) => Some(DateAdjustment::between(computed, date, period)),
        _ => None,
    };

    Verdict::Amend(Amendment {
        patch,
        date,
        carry: rest.cloned(),
        adjustment,
    })
}
