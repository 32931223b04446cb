//! # retention-core
//!
//! Foundation crate for the retention console.
//! Defines the alert data model, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod telemetry;

// Re-export the most commonly used types at the crate root.
pub use config::RetentionConfig;
pub use errors::{AlertError, ConfigError, RetentionError, RetentionResult};
pub use models::{AlertCategory, AlertKey, AlertRecord, AlertSet, ItemDetail};
pub use telemetry::init_tracing;

#[doc(hidden)]
pub use tracing;
