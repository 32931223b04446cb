use super::{AlertError, ConfigError};

/// Top-level error. Aggregates the per-concern errors via `From`.
#[derive(Debug, thiserror::Error)]
pub enum RetentionError {
    #[error("alert error: {0}")]
    Alert(#[from] AlertError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type RetentionResult<T> = Result<T, RetentionError>;
