use recurrentry_config::ConfigError;
use recurrentry_core::RecurrenceError;
use thiserror::Error;

/// Top-level error returned by the [`crate::Recurrentry`] facade.
#[derive(Debug, Error)]
pub enum RecurrentryError {
    #[error("Recurrence error: {0}")]
    Recurrence(#[from] RecurrenceError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
