//! Ordinal day specifications such as `third-wednesday` or `last-weekday`.

use std::{fmt, str::FromStr};

use chrono::Weekday;
use serde::{de::Deserializer, Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Position of the requested day among the matching days of a month.
pub enum OrdinalPosition {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    NextToLast,
    Last,
}

impl OrdinalPosition {
    /// Zero-based rank for positions counted from the start of the month.
    pub fn rank(self) -> Option<usize> {
        match self {
            OrdinalPosition::First => Some(0),
            OrdinalPosition::Second => Some(1),
            OrdinalPosition::Third => Some(2),
            OrdinalPosition::Fourth => Some(3),
            OrdinalPosition::Fifth => Some(4),
            OrdinalPosition::NextToLast | OrdinalPosition::Last => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrdinalPosition::First => "first",
            OrdinalPosition::Second => "second",
            OrdinalPosition::Third => "third",
            OrdinalPosition::Fourth => "fourth",
            OrdinalPosition::Fifth => "fifth",
            OrdinalPosition::NextToLast => "nextToLast",
            OrdinalPosition::Last => "last",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let position = match value {
            "first" => OrdinalPosition::First,
            "second" => OrdinalPosition::Second,
            "third" => OrdinalPosition::Third,
            "fourth" => OrdinalPosition::Fourth,
            "fifth" => OrdinalPosition::Fifth,
            "nextToLast" => OrdinalPosition::NextToLast,
            "last" => OrdinalPosition::Last,
            _ => return None,
        };
        Some(position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which days of the month an ordinal counts.
pub enum DayCategory {
    /// Every calendar day.
    Day,
    /// Days outside the weekend set.
    Weekday,
    /// Days inside the weekend set.
    Weekend,
    /// Only the named day of the week.
    Named(Weekday),
}

impl DayCategory {
    /// Weekday/weekend categories are only meaningful with a weekend-day set.
    pub fn needs_weekend_days(self) -> bool {
        matches!(self, DayCategory::Weekday | DayCategory::Weekend)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayCategory::Day => "day",
            DayCategory::Weekday => "weekday",
            DayCategory::Weekend => "weekend",
            DayCategory::Named(weekday) => weekday_name(weekday),
        }
    }

    fn parse(value: &str) -> Option<Self> {
        let category = match value {
            "day" => DayCategory::Day,
            "weekday" => DayCategory::Weekday,
            "weekend" => DayCategory::Weekend,
            "monday" => DayCategory::Named(Weekday::Mon),
            "tuesday" => DayCategory::Named(Weekday::Tue),
            "wednesday" => DayCategory::Named(Weekday::Wed),
            "thursday" => DayCategory::Named(Weekday::Thu),
            "friday" => DayCategory::Named(Weekday::Fri),
            "saturday" => DayCategory::Named(Weekday::Sat),
            "sunday" => DayCategory::Named(Weekday::Sun),
            _ => return None,
        };
        Some(category)
    }
}

/// Lowercase English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// A `{position}-{category}` rule picking one day within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ordinal {
    pub position: OrdinalPosition,
    pub category: DayCategory,
}

impl Ordinal {
    pub const fn new(position: OrdinalPosition, category: DayCategory) -> Self {
        Self { position, category }
    }

    pub fn needs_weekend_days(&self) -> bool {
        self.category.needs_weekend_days()
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.position.as_str(), self.category.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a string is not a valid ordinal specification.
pub struct ParseOrdinalError {
    input: String,
}

impl ParseOrdinalError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseOrdinalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid ordinal specification `{}` (expected `<position>-<day>`)",
            self.input
        )
    }
}

impl std::error::Error for ParseOrdinalError {}

impl FromStr for Ordinal {
    type Err = ParseOrdinalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseOrdinalError {
            input: value.to_string(),
        };
        let (position, category) = value.trim().split_once('-').ok_or_else(invalid)?;
        let position = OrdinalPosition::parse(position).ok_or_else(invalid)?;
        let category = DayCategory::parse(category).ok_or_else(invalid)?;
        Ok(Ordinal::new(position, category))
    }
}

impl Serialize for Ordinal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ordinal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
