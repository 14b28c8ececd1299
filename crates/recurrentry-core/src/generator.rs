//! Expands entries into dated occurrences.

use chrono::{Datelike, NaiveDate};
use recurrentry_domain::{
    DateRange, Entry, GeneratedEntry, IntervalCaps, Modification, Ordinal, Patch, PaymentTerms,
    Period, RecurrenceConfig, Schedule,
};
use tracing::{debug, trace};

use crate::{
    adjustment::DateAdjustment,
    calendar::{add_by_period, week_start, with_month_clamped, TimeUnit},
    modification::{ModificationIndex, Verdict},
    ordinal::resolve_ordinal,
    work_calendar::{WeekendDays, WorkCalendar},
    RecurrenceError,
};

/// Inputs for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions<'a> {
    pub entries: &'a [Entry],
    pub modifications: &'a [Modification],
    pub max_intervals: IntervalCaps,
    pub calendar: &'a WorkCalendar,
    pub range: Option<DateRange>,
}

impl<'a> GeneratorOptions<'a> {
    pub fn new(entries: &'a [Entry], calendar: &'a WorkCalendar) -> Self {
        Self {
            entries,
            modifications: &[],
            max_intervals: IntervalCaps::default(),
            calendar,
            range: None,
        }
    }

    pub fn with_modifications(mut self, modifications: &'a [Modification]) -> Self {
        self.modifications = modifications;
        self
    }

    pub fn with_max_intervals(mut self, max_intervals: IntervalCaps) -> Self {
        self.max_intervals = max_intervals;
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// State threaded from one occurrence of an entry to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarryState {
    /// Rest payload merged into every later occurrence.
    pub payload: Option<Patch>,
    /// Shift applied to later computed dates.
    pub adjustment: Option<DateAdjustment>,
    /// Set once a modification deleted the remaining occurrences.
    pub halted: bool,
}

impl CarryState {
    /// The carried adjustment, which only takes effect alongside a carried payload.
    pub fn active_adjustment(&self) -> Option<DateAdjustment> {
        self.payload.as_ref().and(self.adjustment)
    }

    /// Builds occurrence `index` of `entry` with the carried payload merged in.
    pub fn occurrence(
        &self,
        entry: &Entry,
        index: u32,
        actual_date: NaiveDate,
        payment_date: NaiveDate,
    ) -> GeneratedEntry {
        let mut merged = entry.clone();
        if let Some(payload) = &self.payload {
            merged.apply(payload);
        }
        GeneratedEntry {
            entry: merged,
            index,
            actual_date,
            payment_date,
        }
    }

    /// Folds a verdict into the state. Returns the next state and the
    /// occurrence when it survives.
    pub fn advance(
        self,
        mut occurrence: GeneratedEntry,
        verdict: Verdict,
    ) -> (Self, Option<GeneratedEntry>) {
        match verdict {
            Verdict::Keep => (self, Some(occurrence)),
            Verdict::Delete => (self, None),
            Verdict::Halt => (
                Self {
                    halted: true,
                    ..self
                },
                None,
            ),
            Verdict::Amend(amendment) => {
                occurrence.entry.apply(&amendment.patch);
                if let Some(date) = amendment.date {
                    occurrence.actual_date = date;
                    occurrence.payment_date = date;
                }
                let next = Self {
                    payload: amendment.carry.or(self.payload),
                    adjustment: amendment.adjustment.or(self.adjustment),
                    halted: false,
                };
                (next, Some(occurrence))
            }
        }
    }
}

/// Expands every entry into its occurrences.
///
/// Output is grouped by entry in input order, ascending by index within a
/// group. Entries whose ordinal needs weekend days are rejected before any
/// occurrence is produced when the calendar has none.
pub fn generate(
    options: &GeneratorOptions<'_>,
) -> Result<Vec<GeneratedEntry>, RecurrenceError> {
    validate(options)?;
    let modifications = ModificationIndex::new(options.modifications);
    let mut output = Vec::new();
    for entry in options.entries {
        expand(entry, options, &modifications, &mut output)?;
    }
    debug!(
        entries = options.entries.len(),
        occurrences = output.len(),
        "generation finished"
    );
    Ok(output)
}

fn validate(options: &GeneratorOptions<'_>) -> Result<(), RecurrenceError> {
    if !options.calendar.weekend().is_empty() {
        return Ok(());
    }
    for entry in options.entries {
        let ordinal = entry
            .config
            .as_ref()
            .and_then(RecurrenceConfig::schedule)
            .and_then(|schedule| schedule.on);
        if let Some(ordinal) = ordinal.filter(Ordinal::needs_weekend_days) {
            return Err(RecurrenceError::Configuration(format!(
                "entry {}: `{ordinal}` requires weekend days to be configured",
                entry.id
            )));
        }
    }
    Ok(())
}

enum Flow {
    Continue,
    Stop,
}

/// Per-entry emission state.
struct Expansion<'o, 'a> {
    entry: &'a Entry,
    period: Period,
    terms: PaymentTerms,
    calendar: &'a WorkCalendar,
    range: DateRange,
    modifications: &'o ModificationIndex<'a>,
    carry: CarryState,
    index: u32,
}

impl<'o, 'a> Expansion<'o, 'a> {
    fn emit(
        &mut self,
        actual: NaiveDate,
        output: &mut Vec<GeneratedEntry>,
    ) -> Result<Flow, RecurrenceError> {
        self.index += 1;
        let payment = self.calendar.payment_date(actual, self.terms)?;
        let occurrence = self.carry.occurrence(self.entry, self.index, actual, payment);
        let verdict = self
            .modifications
            .verdict(&self.entry.id, self.index, actual, self.period);
        let (carry, kept) = std::mem::take(&mut self.carry).advance(occurrence, verdict);
        self.carry = carry;

        if self.carry.halted {
            debug!(entry = %self.entry.id, index = self.index, "remaining occurrences deleted");
            return Ok(Flow::Stop);
        }
        match kept {
            Some(occurrence) if self.range.contains(occurrence.actual_date) => {
                output.push(occurrence)
            }
            Some(_) => {}
            None => trace!(entry = %self.entry.id, index = self.index, "occurrence deleted"),
        }

        // Computed dates only move backwards through a date override.
        if self.range.is_past_end(actual)
            && !self
                .modifications
                .has_date_override_from(&self.entry.id, self.index)
        {
            debug!(entry = %self.entry.id, index = self.index, "range end passed");
            return Ok(Flow::Stop);
        }
        Ok(Flow::Continue)
    }
}

fn expand<'a>(
    entry: &'a Entry,
    options: &GeneratorOptions<'a>,
    modifications: &ModificationIndex<'a>,
    output: &mut Vec<GeneratedEntry>,
) -> Result<(), RecurrenceError> {
    let schedule = entry.config.as_ref().and_then(RecurrenceConfig::schedule);
    let mut expansion = Expansion {
        entry,
        period: schedule.map_or(Period::None, |schedule| schedule.period),
        terms: entry
            .config
            .as_ref()
            .map(RecurrenceConfig::terms)
            .unwrap_or_default(),
        calendar: options.calendar,
        range: options.range.unwrap_or_default(),
        modifications,
        carry: CarryState::default(),
        index: 0,
    };

    let Some(schedule) = schedule else {
        debug!(entry = %entry.id, date = %entry.date, "single occurrence");
        expansion.emit(entry.date, output)?;
        return Ok(());
    };

    let intervals = options
        .max_intervals
        .limit(schedule.period, schedule.interval);
    debug!(
        entry = %entry.id,
        period = %schedule.period,
        intervals,
        "expanding entry"
    );
    let weekend = options.calendar.weekend();
    for interval in 0..intervals {
        let adjustment = expansion.carry.active_adjustment();
        for actual in candidates(&schedule, interval, adjustment, weekend)? {
            if let Flow::Stop = expansion.emit(actual, output)? {
                return Ok(());
            }
        }
    }
    Ok(())
}

/// Candidate dates of one interval, ascending. Repeated `each` values yield
/// repeated candidates, each taking its own index.
fn candidates(
    schedule: &Schedule<'_>,
    interval: u32,
    adjustment: Option<DateAdjustment>,
    weekend: WeekendDays,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    let step = i64::from(interval) * i64::from(schedule.every);
    let mut dates = Vec::with_capacity(schedule.each.len().max(1));

    match (schedule.period, schedule.each.is_empty()) {
        (Period::Week, true) => {
            let date = add_by_period(schedule.start, step, TimeUnit::Week)?;
            dates.push(adjust(date, adjustment)?);
        }
        (Period::Week, false) => {
            let monday = week_start(add_by_period(schedule.start, step, TimeUnit::Week)?)?;
            for &day in schedule.each {
                if !(1..=7).contains(&day) {
                    trace!(day, "day of week outside 1-7 skipped");
                    continue;
                }
                let date = add_by_period(monday, i64::from(day - 1), TimeUnit::Day)?;
                dates.push(adjust(date, adjustment)?);
            }
        }
        (Period::Month, false) => {
            let base = add_by_period(schedule.start, step, TimeUnit::Month)?;
            for &day in schedule.each {
                let Some(date) = base.with_day(u32::from(day)) else {
                    trace!(day, month = %base, "day of month not in month, skipped");
                    continue;
                };
                let date = adjust(date, adjustment)?;
                push_resolved(&mut dates, date, schedule.on, weekend)?;
            }
        }
        (_, false) => {
            let base = add_by_period(schedule.start, step, TimeUnit::Year)?;
            for &month in schedule.each {
                let selected = (1..=12)
                    .contains(&month)
                    .then(|| with_month_clamped(base, u32::from(month)))
                    .flatten();
                let Some(mut date) = selected else {
                    trace!(month, "month outside 1-12 skipped");
                    continue;
                };
                if let Some(adjustment) = adjustment {
                    date = adjustment.apply_within_year(date);
                }
                push_resolved(&mut dates, date, schedule.on, weekend)?;
            }
        }
        (period, true) => {
            let base = add_by_period(schedule.start, step, period)?;
            let date = adjust(base, adjustment)?;
            push_resolved(&mut dates, date, schedule.on, weekend)?;
        }
    }

    dates.sort_unstable();
    Ok(dates)
}

fn adjust(
    date: NaiveDate,
    adjustment: Option<DateAdjustment>,
) -> Result<NaiveDate, RecurrenceError> {
    match adjustment {
        Some(adjustment) => adjustment.apply(date),
        None => Ok(date),
    }
}

/// Pushes `date`, or the day `on` picks in its month when an ordinal is set.
fn push_resolved(
    dates: &mut Vec<NaiveDate>,
    date: NaiveDate,
    on: Option<Ordinal>,
    weekend: WeekendDays,
) -> Result<(), RecurrenceError> {
    let Some(ordinal) = on else {
        dates.push(date);
        return Ok(());
    };
    match resolve_ordinal(date, ordinal, weekend)? {
        Some(resolved) => dates.push(resolved),
        None => trace!(%ordinal, anchor = %date, "no matching day, interval skipped"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use recurrentry_domain::{CalendarOptions, WeeklyOptions};
    use serde_json::json;

    use crate::modification::Amendment;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekend() -> WeekendDays {
        WeekendDays::from_numbers(&[6, 7]).unwrap()
    }

    fn schedule_of(config: &RecurrenceConfig) -> Schedule<'_> {
        config.schedule().unwrap()
    }

    #[test]
    fn advance_keeps_state_on_plain_verdicts() {
        let entry = Entry::new(1, date(2024, 1, 1));
        let state = CarryState::default();
        let occurrence = state.occurrence(&entry, 1, date(2024, 1, 1), date(2024, 1, 1));

        let (state, kept) = state.advance(occurrence.clone(), Verdict::Keep);
        assert_eq!(kept, Some(occurrence.clone()));
        assert_eq!(state, CarryState::default());

        let (state, kept) = state.advance(occurrence.clone(), Verdict::Delete);
        assert!(kept.is_none());
        assert!(!state.halted);

        let (state, kept) = state.advance(occurrence, Verdict::Halt);
        assert!(kept.is_none());
        assert!(state.halted);
    }

    #[test]
    fn advance_replaces_payload_but_keeps_adjustment() {
        let entry = Entry::new(1, date(2024, 1, 1)).with_field("amount", 100);
        let state = CarryState {
            payload: Some(Patch::default().with_field("amount", 150)),
            adjustment: Some(DateAdjustment { months: 0, days: 2 }),
            halted: false,
        };
        let occurrence = state.occurrence(&entry, 3, date(2024, 3, 3), date(2024, 3, 3));
        assert_eq!(occurrence.entry.field("amount"), Some(&json!(150)));

        let amendment = Amendment {
            patch: Patch::default().with_field("amount", 175),
            carry: Some(Patch::default().with_field("amount", 175)),
            ..Amendment::default()
        };
        let (next, kept) = state.advance(occurrence, Verdict::Amend(amendment));
        assert_eq!(kept.unwrap().entry.field("amount"), Some(&json!(175)));
        assert_eq!(next.adjustment, Some(DateAdjustment { months: 0, days: 2 }));
        assert_eq!(next.payload.unwrap().fields["amount"], 175);
    }

    #[test]
    fn date_override_sets_both_dates() {
        let entry = Entry::new(1, date(2024, 1, 1));
        let state = CarryState::default();
        let occurrence = state.occurrence(&entry, 1, date(2024, 1, 6), date(2024, 1, 8));
        let amendment = Amendment {
            date: Some(date(2024, 1, 10)),
            ..Amendment::default()
        };
        let (next, kept) = state.advance(occurrence, Verdict::Amend(amendment));
        let kept = kept.unwrap();
        assert_eq!(kept.actual_date, date(2024, 1, 10));
        assert_eq!(kept.payment_date, date(2024, 1, 10));
        assert_eq!(next.active_adjustment(), None);
    }

    #[test]
    fn adjustment_is_inactive_without_payload() {
        let state = CarryState {
            payload: None,
            adjustment: Some(DateAdjustment { months: 1, days: 0 }),
            halted: false,
        };
        assert_eq!(state.active_adjustment(), None);
    }

    #[test]
    fn weekly_each_uses_the_iso_week_of_the_period_start() {
        // 2024-01-03 is a Wednesday; its week starts on Monday 2024-01-01.
        let config = RecurrenceConfig::weekly(
            date(2024, 1, 3),
            2,
            WeeklyOptions::default().with_each([5, 1, 9, 1]),
        );
        let schedule = schedule_of(&config);
        assert_eq!(
            candidates(&schedule, 0, None, weekend()).unwrap(),
            vec![date(2024, 1, 1), date(2024, 1, 1), date(2024, 1, 5)]
        );
        assert_eq!(
            candidates(&schedule, 1, None, weekend()).unwrap(),
            vec![date(2024, 1, 8), date(2024, 1, 8), date(2024, 1, 12)]
        );
    }

    #[test]
    fn monthly_each_skips_days_missing_from_the_month() {
        let config = RecurrenceConfig::monthly(
            date(2024, 1, 1),
            2,
            CalendarOptions::default().with_each([31, 30, 15, 0]),
        );
        let schedule = schedule_of(&config);
        assert_eq!(
            candidates(&schedule, 1, None, weekend()).unwrap(),
            vec![date(2024, 2, 15)]
        );
        assert_eq!(
            candidates(&schedule, 0, None, weekend()).unwrap(),
            vec![date(2024, 1, 15), date(2024, 1, 30), date(2024, 1, 31)]
        );
    }

    #[test]
    fn yearly_each_clamps_the_day_into_the_month() {
        let config = RecurrenceConfig::yearly(
            date(2024, 1, 31),
            1,
            CalendarOptions::default().with_each([2, 13, 4]),
        );
        let schedule = schedule_of(&config);
        assert_eq!(
            candidates(&schedule, 0, None, weekend()).unwrap(),
            vec![date(2024, 2, 29), date(2024, 4, 30)]
        );
    }

    #[test]
    fn ordinal_without_match_yields_no_candidate() {
        let config = RecurrenceConfig::monthly(
            date(2024, 1, 1),
            2,
            CalendarOptions::default().with_on("fifth-monday".parse().unwrap()),
        );
        let schedule = schedule_of(&config);
        // January 2024 has five Mondays, February only four.
        assert_eq!(
            candidates(&schedule, 0, None, weekend()).unwrap(),
            vec![date(2024, 1, 29)]
        );
        assert!(candidates(&schedule, 1, None, weekend()).unwrap().is_empty());
    }

    #[test]
    fn carried_adjustment_moves_plain_candidates() {
        let config = RecurrenceConfig::monthly(date(2024, 1, 1), 3, CalendarOptions::default());
        let schedule = schedule_of(&config);
        let adjustment = Some(DateAdjustment { months: 0, days: 4 });
        assert_eq!(
            candidates(&schedule, 2, adjustment, weekend()).unwrap(),
            vec![date(2024, 3, 5)]
        );
    }
}
