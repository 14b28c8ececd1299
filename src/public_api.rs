//! Stable entry point that pre-binds the work calendar and interval caps.

use chrono::NaiveDate;
use recurrentry_config::{ConfigManager, GeneratorConfig};
use recurrentry_core::{generate, GeneratorOptions, WorkCalendar};
use recurrentry_domain::{DateRange, Entry, GeneratedEntry, IntervalCaps, Modification};
use tracing::debug;

use crate::RecurrentryError;

/// Occurrence generator bound to a weekend/holiday calendar.
#[derive(Debug, Clone)]
pub struct Recurrentry {
    calendar: WorkCalendar,
    max_intervals: IntervalCaps,
}

impl Recurrentry {
    /// Binds ISO weekend day numbers (1 = Monday .. 7 = Sunday) and holidays.
    pub fn new(
        weekend_days: &[u8],
        holidays: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, RecurrentryError> {
        Ok(Self {
            calendar: WorkCalendar::new(weekend_days, holidays)?,
            max_intervals: IntervalCaps::default(),
        })
    }

    /// Builds the generator from stored settings; holiday strings are validated here.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, RecurrentryError> {
        let calendar = WorkCalendar::from_iso_holidays(&config.weekend_days, &config.holidays)?;
        debug!(
            weekend_days = ?config.weekend_days,
            holidays = config.holidays.len(),
            "calendar loaded from configuration"
        );
        Ok(Self {
            calendar,
            max_intervals: config.max_intervals,
        })
    }

    /// Loads settings through `manager` (defaults when no file exists).
    pub fn load(manager: &ConfigManager) -> Result<Self, RecurrentryError> {
        let config = manager.load()?;
        Self::from_config(&config)
    }

    pub fn with_max_intervals(mut self, max_intervals: IntervalCaps) -> Self {
        self.max_intervals = max_intervals;
        self
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn max_intervals(&self) -> IntervalCaps {
        self.max_intervals
    }

    /// Expands `entries`, applying `modifications` and the optional `range`.
    pub fn generate(
        &self,
        entries: &[Entry],
        modifications: &[Modification],
        range: Option<DateRange>,
    ) -> Result<Vec<GeneratedEntry>, RecurrentryError> {
        let options = GeneratorOptions {
            entries,
            modifications,
            max_intervals: self.max_intervals,
            calendar: &self.calendar,
            range,
        };
        Ok(generate(&options)?)
    }
}
