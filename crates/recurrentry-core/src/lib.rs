//! recurrentry-core
//!
//! Occurrence generation engine: calendar arithmetic, ordinal resolution,
//! payment dates, modification cascading and the generator itself.
//! Depends on recurrentry-domain. No I/O, no global state.

pub mod adjustment;
pub mod calendar;
pub mod error;
pub mod generator;
pub mod modification;
pub mod ordinal;
pub mod work_calendar;

pub use adjustment::DateAdjustment;
pub use calendar::{add_by_period, days_in_month, parse_date, week_start, TimeUnit};
pub use error::RecurrenceError;
pub use generator::{generate, CarryState, GeneratorOptions};
pub use modification::{Amendment, ModificationIndex, Verdict};
pub use ordinal::resolve_ordinal;
pub use work_calendar::{WeekendDays, WorkCalendar};
