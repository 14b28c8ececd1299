//! Generated occurrences and the optional output range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// One concrete dated occurrence of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedEntry {
    /// The entry with every applicable patch merged in.
    #[serde(rename = "$")]
    pub entry: Entry,
    /// 1-based occurrence number within the entry.
    pub index: u32,
    pub actual_date: NaiveDate,
    pub payment_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Inclusive date bounds applied to generated occurrences.
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn since(start: NaiveDate) -> Self {
        Self::new(Some(start), None)
    }

    pub fn until(end: NaiveDate) -> Self {
        Self::new(None, Some(end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn is_past_end(&self, date: NaiveDate) -> bool {
        self.end.is_some_and(|end| date > end)
    }
}
