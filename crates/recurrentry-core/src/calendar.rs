//! Period-aware date arithmetic.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use recurrentry_domain::Period;

use crate::RecurrenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Granularity used by [`add_by_period`].
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl From<Period> for TimeUnit {
    fn from(period: Period) -> Self {
        match period {
            Period::None => TimeUnit::Day,
            Period::Week => TimeUnit::Week,
            Period::Month => TimeUnit::Month,
            Period::Year => TimeUnit::Year,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Day => "day(s)",
            TimeUnit::Week => "week(s)",
            TimeUnit::Month => "month(s)",
            TimeUnit::Year => "year(s)",
        };
        f.write_str(label)
    }
}

/// Adds `amount` units to `date`.
///
/// Month and year steps clamp the day to the end of the target month, so
/// January 31st plus one month is the last day of February.
pub fn add_by_period(
    date: NaiveDate,
    amount: i64,
    unit: impl Into<TimeUnit>,
) -> Result<NaiveDate, RecurrenceError> {
    let unit = unit.into();
    let shifted = match unit {
        TimeUnit::Day => shift_days(date, amount),
        TimeUnit::Week => amount
            .checked_mul(7)
            .and_then(|days| shift_days(date, days)),
        TimeUnit::Month => shift_months(date, amount),
        TimeUnit::Year => amount
            .checked_mul(12)
            .and_then(|months| shift_months(date, months)),
    };
    shifted.ok_or_else(|| {
        RecurrenceError::InvalidDate(format!("{date} shifted by {amount} {unit} is out of range"))
    })
}

pub(crate) fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Parses an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, RecurrenceError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| RecurrenceError::InvalidDate(format!("`{value}`: {err}")))
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last_current| last_current.day())
        .unwrap_or(28)
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> Result<NaiveDate, RecurrenceError> {
    let delta = i64::from(date.weekday().num_days_from_monday());
    shift_days(date, -delta)
        .ok_or_else(|| RecurrenceError::InvalidDate(format!("week of {date} is out of range")))
}

/// Replaces the day of month, clamping it into the month.
pub(crate) fn with_day_clamped(date: NaiveDate, day: i64) -> NaiveDate {
    let last = i64::from(days_in_month(date.year(), date.month()));
    let day = day.clamp(1, last) as u32;
    date.with_day(day).unwrap_or(date)
}

/// Moves `date` into `month` of the same year, clamping the day into it.
pub(crate) fn with_month_clamped(date: NaiveDate, month: u32) -> Option<NaiveDate> {
    let day = date.day().min(days_in_month(date.year(), month));
    NaiveDate::from_ymd_opt(date.year(), month, day)
}
