//! Weekend/holiday calendar and payment date adjustment.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use recurrentry_domain::PaymentTerms;

use crate::{calendar::parse_date, calendar::shift_days, RecurrenceError};

/// Set of ISO weekday numbers (1 = Monday .. 7 = Sunday) treated as weekend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekendDays(u8);

impl WeekendDays {
    /// Builds the set, rejecting numbers outside 1-7.
    pub fn from_numbers(numbers: &[u8]) -> Result<Self, RecurrenceError> {
        let mut bits = 0u8;
        for &number in numbers {
            if !(1..=7).contains(&number) {
                return Err(RecurrenceError::Configuration(format!(
                    "weekend day {number} is outside 1-7"
                )));
            }
            bits |= 1 << (number - 1);
        }
        Ok(Self(bits))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.contains_number(weekday.number_from_monday())
    }

    pub fn contains_number(&self, number: u32) -> bool {
        (1..=7).contains(&number) && self.0 & (1 << (number - 1)) != 0
    }

    pub fn numbers(&self) -> Vec<u8> {
        (1..=7u8).filter(|&n| self.contains_number(u32::from(n))).collect()
    }
}

/// Weekend days plus holidays: everything that is not a working day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkCalendar {
    weekend: WeekendDays,
    holidays: HashSet<NaiveDate>,
}

impl WorkCalendar {
    pub fn new(
        weekend_days: &[u8],
        holidays: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, RecurrenceError> {
        let weekend = WeekendDays::from_numbers(weekend_days)?;
        if weekend.len() == 7 {
            return Err(RecurrenceError::Configuration(
                "every day of the week is marked as weekend".into(),
            ));
        }
        Ok(Self {
            weekend,
            holidays: holidays.into_iter().collect(),
        })
    }

    /// Builds a calendar from ISO `YYYY-MM-DD` holiday strings.
    pub fn from_iso_holidays<S: AsRef<str>>(
        weekend_days: &[u8],
        holidays: &[S],
    ) -> Result<Self, RecurrenceError> {
        let parsed = holidays
            .iter()
            .map(|raw| {
                parse_date(raw.as_ref()).map_err(|_| {
                    RecurrenceError::InvalidHolidaySet(format!(
                        "`{}` is not a calendar date",
                        raw.as_ref()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(weekend_days, parsed)
    }

    pub fn weekend(&self) -> WeekendDays {
        self.weekend
    }

    pub fn holidays(&self) -> &HashSet<NaiveDate> {
        &self.holidays
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(date.weekday())
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Derives the payment date for an occurrence on `actual`.
    ///
    /// A positive grace period is added first. With a workday direction the
    /// date then walks one day at a time until it is neither a weekend day
    /// nor a holiday.
    pub fn payment_date(
        &self,
        actual: NaiveDate,
        terms: PaymentTerms,
    ) -> Result<NaiveDate, RecurrenceError> {
        let mut date = actual;
        if terms.grace_period > 0 {
            date = step(date, i64::from(terms.grace_period))?;
        }

        let Some(direction) = terms.workdays_only.step() else {
            return Ok(date);
        };
        if self.weekend.is_empty() && self.holidays.is_empty() {
            return Ok(date);
        }
        while !self.is_working_day(date) {
            date = step(date, direction)?;
        }
        Ok(date)
    }
}

fn step(date: NaiveDate, days: i64) -> Result<NaiveDate, RecurrenceError> {
    shift_days(date, days).ok_or_else(|| {
        RecurrenceError::InvalidDate(format!("{date} shifted by {days} day(s) is out of range"))
    })
}
