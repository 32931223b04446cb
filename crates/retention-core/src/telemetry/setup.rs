//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Reads the `RETENTION_LOG` environment variable for per-target levels,
/// e.g. `RETENTION_LOG=retention_alerts=debug,reqwest=warn`.
/// Falls back to `config.log_level` when it is not set or invalid.
///
/// Events go to stderr so stdout stays free for command output.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RETENTION_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

        if config.json_logs {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Transport crates are noisy below `warn`.
fn default_directives(level: &str) -> String {
    format!("{level},hyper=warn,reqwest=warn,tungstenite=warn,tokio_tungstenite=warn")
}
