//! Recurrence rules attached to entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{de::Deserializer, Deserialize, Serialize};

use crate::ordinal::Ordinal;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
/// Enumerates the recurrence cadences.
pub enum Period {
    #[default]
    None,
    Week,
    Month,
    Year,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::None => "none",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
/// Direction used to walk off weekends and holidays when computing payment dates.
pub enum WorkdayDirection {
    /// Keep the date even when it is not a working day.
    #[default]
    None,
    Previous,
    Next,
}

impl WorkdayDirection {
    /// Day step applied while the date is not a working day.
    pub fn step(self) -> Option<i64> {
        match self {
            WorkdayDirection::None => None,
            WorkdayDirection::Previous => Some(-1),
            WorkdayDirection::Next => Some(1),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWorkdayDirection {
    Flag(bool),
    Name(String),
}

impl<'de> Deserialize<'de> for WorkdayDirection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Older payloads used a plain boolean meaning "roll forward".
        let direction = match Option::<RawWorkdayDirection>::deserialize(deserializer)? {
            None | Some(RawWorkdayDirection::Flag(false)) => WorkdayDirection::None,
            Some(RawWorkdayDirection::Flag(true)) => WorkdayDirection::Next,
            Some(RawWorkdayDirection::Name(name)) => match name.trim() {
                "" | "none" => WorkdayDirection::None,
                "previous" => WorkdayDirection::Previous,
                "next" => WorkdayDirection::Next,
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "unknown workday direction `{other}`"
                    )))
                }
            },
        };
        Ok(direction)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
/// Grace period and workday handling used to derive a payment date.
pub struct PaymentTerms {
    #[serde(default)]
    pub workdays_only: WorkdayDirection,
    /// Days added to the occurrence date; values `<= 0` are ignored.
    #[serde(default)]
    pub grace_period: i32,
}

impl PaymentTerms {
    pub fn new(grace_period: i32, workdays_only: WorkdayDirection) -> Self {
        Self {
            workdays_only,
            grace_period,
        }
    }
}

/// Options for one-off entries. Only the payment terms apply.
pub type SingleOptions = PaymentTerms;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Options accepted by weekly rules. Weekly rules cannot carry an ordinal.
pub struct WeeklyOptions {
    #[serde(default = "default_every")]
    pub every: u32,
    /// ISO days of the week, 1 (Monday) to 7 (Sunday).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub each: Vec<u8>,
    #[serde(flatten)]
    pub terms: PaymentTerms,
}

impl Default for WeeklyOptions {
    fn default() -> Self {
        Self {
            every: default_every(),
            each: Vec::new(),
            terms: PaymentTerms::default(),
        }
    }
}

impl WeeklyOptions {
    pub fn with_every(mut self, every: u32) -> Self {
        self.every = every;
        self
    }

    pub fn with_each(mut self, each: impl IntoIterator<Item = u8>) -> Self {
        self.each = each.into_iter().collect();
        self
    }

    pub fn with_workdays(mut self, direction: WorkdayDirection) -> Self {
        self.terms.workdays_only = direction;
        self
    }

    pub fn with_grace_period(mut self, days: i32) -> Self {
        self.terms.grace_period = days;
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Options accepted by monthly and yearly rules.
pub struct CalendarOptions {
    #[serde(default = "default_every")]
    pub every: u32,
    /// Days of the month (1-31) for monthly rules, months (1-12) for yearly rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub each: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<Ordinal>,
    #[serde(flatten)]
    pub terms: PaymentTerms,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            every: default_every(),
            each: Vec::new(),
            on: None,
            terms: PaymentTerms::default(),
        }
    }
}

impl CalendarOptions {
    pub fn with_every(mut self, every: u32) -> Self {
        self.every = every;
        self
    }

    pub fn with_each(mut self, each: impl IntoIterator<Item = u8>) -> Self {
        self.each = each.into_iter().collect();
        self
    }

    pub fn with_on(mut self, ordinal: Ordinal) -> Self {
        self.on = Some(ordinal);
        self
    }

    pub fn with_workdays(mut self, direction: WorkdayDirection) -> Self {
        self.terms.workdays_only = direction;
        self
    }

    pub fn with_grace_period(mut self, days: i32) -> Self {
        self.terms.grace_period = days;
        self
    }
}

fn default_every() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "period")]
/// Recurrence rule, one variant per period with only the options valid for it.
pub enum RecurrenceConfig {
    #[serde(rename = "none")]
    Single {
        start: NaiveDate,
        #[serde(default)]
        options: SingleOptions,
    },
    #[serde(rename = "week")]
    Weekly {
        start: NaiveDate,
        /// Requested number of intervals; `0` means the period's cap.
        #[serde(default)]
        interval: u32,
        #[serde(default)]
        options: WeeklyOptions,
    },
    #[serde(rename = "month")]
    Monthly {
        start: NaiveDate,
        #[serde(default)]
        interval: u32,
        #[serde(default)]
        options: CalendarOptions,
    },
    #[serde(rename = "year")]
    Yearly {
        start: NaiveDate,
        #[serde(default)]
        interval: u32,
        #[serde(default)]
        options: CalendarOptions,
    },
}

/// Borrowed, period-independent view over a recurring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule<'a> {
    pub start: NaiveDate,
    pub period: Period,
    pub interval: u32,
    /// Step between intervals, at least 1.
    pub every: u32,
    pub each: &'a [u8],
    pub on: Option<Ordinal>,
    pub terms: PaymentTerms,
}

impl RecurrenceConfig {
    pub fn single(start: NaiveDate) -> Self {
        RecurrenceConfig::Single {
            start,
            options: SingleOptions::default(),
        }
    }

    pub fn weekly(start: NaiveDate, interval: u32, options: WeeklyOptions) -> Self {
        RecurrenceConfig::Weekly {
            start,
            interval,
            options,
        }
    }

    pub fn monthly(start: NaiveDate, interval: u32, options: CalendarOptions) -> Self {
        RecurrenceConfig::Monthly {
            start,
            interval,
            options,
        }
    }

    pub fn yearly(start: NaiveDate, interval: u32, options: CalendarOptions) -> Self {
        RecurrenceConfig::Yearly {
            start,
            interval,
            options,
        }
    }

    pub fn period(&self) -> Period {
        match self {
            RecurrenceConfig::Single { .. } => Period::None,
            RecurrenceConfig::Weekly { .. } => Period::Week,
            RecurrenceConfig::Monthly { .. } => Period::Month,
            RecurrenceConfig::Yearly { .. } => Period::Year,
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.period() != Period::None
    }

    pub fn start(&self) -> NaiveDate {
        match self {
            RecurrenceConfig::Single { start, .. }
            | RecurrenceConfig::Weekly { start, .. }
            | RecurrenceConfig::Monthly { start, .. }
            | RecurrenceConfig::Yearly { start, .. } => *start,
        }
    }

    pub fn terms(&self) -> PaymentTerms {
        match self {
            RecurrenceConfig::Single { options, .. } => *options,
            RecurrenceConfig::Weekly { options, .. } => options.terms,
            RecurrenceConfig::Monthly { options, .. } | RecurrenceConfig::Yearly { options, .. } => {
                options.terms
            }
        }
    }

    /// Returns the recurring view of the rule, or `None` for one-off entries.
    pub fn schedule(&self) -> Option<Schedule<'_>> {
        let period = self.period();
        match self {
            RecurrenceConfig::Single { .. } => None,
            RecurrenceConfig::Weekly {
                start,
                interval,
                options,
            } => Some(Schedule {
                start: *start,
                period,
                interval: *interval,
                every: options.every.max(1),
                each: &options.each,
                on: None,
                terms: options.terms,
            }),
            RecurrenceConfig::Monthly {
                start,
                interval,
                options,
            }
            | RecurrenceConfig::Yearly {
                start,
                interval,
                options,
            } => Some(Schedule {
                start: *start,
                period,
                interval: *interval,
                every: options.every.max(1),
                each: &options.each,
                on: options.on,
                terms: options.terms,
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Upper bound on the intervals examined per entry, by period.
pub struct IntervalCaps {
    pub week: u32,
    pub month: u32,
    pub year: u32,
}

impl Default for IntervalCaps {
    fn default() -> Self {
        Self {
            week: 1248,
            month: 240,
            year: 20,
        }
    }
}

impl IntervalCaps {
    pub fn cap(&self, period: Period) -> u32 {
        match period {
            Period::None => 1,
            Period::Week => self.week,
            Period::Month => self.month,
            Period::Year => self.year,
        }
    }

    /// Number of intervals to examine for a requested count; `0` requests the cap.
    pub fn limit(&self, period: Period, requested: u32) -> u32 {
        let cap = self.cap(period);
        if period == Period::None {
            return cap;
        }
        if requested == 0 {
            cap
        } else {
            requested.min(cap)
        }
    }
}
