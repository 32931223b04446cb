//! Configuration for the retention console.
//! TOML-based, layered resolution: CLI > env > file > defaults.

pub mod defaults;
pub mod feed_config;
pub mod observability_config;
pub mod retention_config;

pub use feed_config::FeedConfig;
pub use observability_config::ObservabilityConfig;
pub use retention_config::{CliOverrides, RetentionConfig};
