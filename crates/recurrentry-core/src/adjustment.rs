//! Relative date shifts carried forward from a date override.

use chrono::{Datelike, NaiveDate};
use recurrentry_domain::Period;

use crate::{
    calendar::{add_by_period, days_in_month, with_day_clamped, TimeUnit},
    RecurrenceError,
};

/// Offset between a computed occurrence date and the date a modification
/// moved it to, re-applied to later occurrences of the same entry.
///
/// The year component is never carried; interval stepping already moves the
/// year forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateAdjustment {
    pub months: i32,
    pub days: i32,
}

impl DateAdjustment {
    /// Derives the adjustment that turns `original` into `modified` for an
    /// entry recurring every `period`.
    pub fn between(original: NaiveDate, modified: NaiveDate, period: Period) -> Self {
        match period {
            Period::Year => Self {
                months: modified.month() as i32 - original.month() as i32,
                days: modified.day() as i32 - original.day() as i32,
            },
            Period::Month => Self {
                months: 0,
                days: modified.day() as i32 - original.day() as i32,
            },
            Period::Week => Self {
                months: 0,
                days: modified.weekday().number_from_monday() as i32
                    - original.weekday().number_from_monday() as i32,
            },
            Period::None => Self::default(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0
    }

    /// Shifts by whole months (month-end clamped) and then by days.
    pub fn apply(&self, date: NaiveDate) -> Result<NaiveDate, RecurrenceError> {
        let shifted = add_by_period(date, i64::from(self.months), TimeUnit::Month)?;
        add_by_period(shifted, i64::from(self.days), TimeUnit::Day)
    }

    /// Re-anchors a date picked from a yearly month list. Month and day are
    /// clamped into the same year instead of rolling over.
    pub fn apply_within_year(&self, date: NaiveDate) -> NaiveDate {
        let month = (date.month() as i32 + self.months).clamp(1, 12) as u32;
        let day = date.day().min(days_in_month(date.year(), month));
        let moved = NaiveDate::from_ymd_opt(date.year(), month, day).unwrap_or(date);
        with_day_clamped(moved, i64::from(moved.day()) + i64::from(self.days))
    }
}
