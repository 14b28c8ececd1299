//! recurrentry-config
//!
//! Generator settings (weekend days, holidays, interval caps) and their
//! JSON persistence.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::GeneratorConfig;
