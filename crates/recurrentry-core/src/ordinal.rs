//! Resolves ordinal specifications against a concrete month.

use chrono::{Datelike, NaiveDate};
use recurrentry_domain::{DayCategory, Ordinal, OrdinalPosition};

use crate::{calendar::days_in_month, work_calendar::WeekendDays, RecurrenceError};

/// Picks the day described by `ordinal` in the month containing `anchor`.
///
/// Returns `Ok(None)` when the month has no such day (a fifth Monday that
/// does not exist, for instance). `nextToLast` falls back to the last match
/// when only one day matches.
pub fn resolve_ordinal(
    anchor: NaiveDate,
    ordinal: Ordinal,
    weekend: WeekendDays,
) -> Result<Option<NaiveDate>, RecurrenceError> {
    if ordinal.needs_weekend_days() && weekend.is_empty() {
        return Err(RecurrenceError::Configuration(format!(
            "`{ordinal}` requires weekend days to be configured"
        )));
    }

    let year = anchor.year();
    let month = anchor.month();
    let matching: Vec<u32> = match ordinal.category {
        DayCategory::Named(weekday) => {
            let first_weekday = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|first| first.weekday().num_days_from_monday())
                .unwrap_or(0);
            let offset = (7 + weekday.num_days_from_monday() - first_weekday) % 7;
            (1 + offset..=days_in_month(year, month)).step_by(7).collect()
        }
        category => (1..=days_in_month(year, month))
            .filter(|&day| {
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    return false;
                };
                match category {
                    DayCategory::Weekday => !weekend.contains(date.weekday()),
                    DayCategory::Weekend => weekend.contains(date.weekday()),
                    _ => true,
                }
            })
            .collect(),
    };

    let picked = match ordinal.position {
        OrdinalPosition::Last => matching.last(),
        OrdinalPosition::NextToLast => matching
            .len()
            .checked_sub(2)
            .and_then(|i| matching.get(i))
            .or_else(|| matching.last()),
        position => position.rank().and_then(|rank| matching.get(rank)),
    };
    Ok(picked.and_then(|&day| NaiveDate::from_ymd_opt(year, month, day)))
}
