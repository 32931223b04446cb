//! Error handling for the retention console.
//! One error enum per concern, `thiserror` only.

pub mod alert_error;
pub mod config_error;
pub mod error_code;
pub mod retention_error;

pub use alert_error::AlertError;
pub use config_error::ConfigError;
pub use error_code::RetentionErrorCode;
pub use retention_error::{RetentionError, RetentionResult};
