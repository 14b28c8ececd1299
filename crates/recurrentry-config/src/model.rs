use recurrentry_domain::IntervalCaps;
use serde::{Deserialize, Serialize};

/// Settings shared by every generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// ISO weekday numbers (1 = Monday .. 7 = Sunday) treated as weekend.
    #[serde(default = "GeneratorConfig::default_weekend_days")]
    pub weekend_days: Vec<u8>,
    /// Holidays as `YYYY-MM-DD` strings; validated when the work calendar is built.
    #[serde(default)]
    pub holidays: Vec<String>,
    #[serde(default)]
    pub max_intervals: IntervalCaps,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            weekend_days: Self::default_weekend_days(),
            holidays: Vec::new(),
            max_intervals: IntervalCaps::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn default_weekend_days() -> Vec<u8> {
        vec![6, 7]
    }

    pub fn with_weekend_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.weekend_days = days.into_iter().collect();
        self
    }

    /// Adds a holiday unless it is already listed.
    pub fn with_holiday(mut self, holiday: impl Into<String>) -> Self {
        let holiday = holiday.into();
        if !self.holidays.contains(&holiday) {
            self.holidays.push(holiday);
        }
        self
    }

    pub fn with_max_intervals(mut self, max_intervals: IntervalCaps) -> Self {
        self.max_intervals = max_intervals;
        self
    }
}
