#![doc(test(attr(deny(warnings))))]

//! Recurrentry expands recurring entries (weekly, monthly, yearly or one-off)
//! into dated occurrences with payment dates, per-occurrence modifications and
//! optional date ranges.
//!
//! The [`Recurrentry`] facade binds a weekend/holiday calendar once and then
//! generates occurrences for any number of entry lists.

pub mod errors;
pub mod public_api;
pub mod utils;

use std::sync::Once;

pub use errors::RecurrentryError;
pub use public_api::Recurrentry;
pub use recurrentry_config::{ConfigError, ConfigManager, GeneratorConfig};
pub use recurrentry_core::{
    add_by_period, generate, parse_date, resolve_ordinal, DateAdjustment, GeneratorOptions,
    RecurrenceError, TimeUnit, WeekendDays, WorkCalendar,
};
pub use recurrentry_domain::*;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Recurrentry tracing initialized.");
    });
}
