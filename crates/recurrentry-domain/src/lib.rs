//! recurrentry-domain
//!
//! Pure data model for recurring entries: entries, recurrence rules, ordinals,
//! modifications and generated occurrences.
//! No I/O and no date arithmetic beyond what the types themselves need.

pub mod entry;
pub mod generated;
pub mod modification;
pub mod ordinal;
pub mod recurrence;

pub use entry::*;
pub use generated::*;
pub use modification::*;
pub use ordinal::*;
pub use recurrence::*;
