use std::path::PathBuf;

use clap::{Parser, Subcommand};

use retention_core::config::CliOverrides;
use retention_core::RetentionConfig;

/// Live retention alerts in the terminal.
#[derive(Debug, Parser)]
#[command(name = "retention-console", version)]
pub struct Cli {
    /// TOML config file.
    #[arg(long, short, global = true, env = "RETENTION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Alert server base URL, e.g. `http://localhost:8080`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// trace, debug, info, warn or error.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Keep the alert board in sync and print it on every change.
    Watch {
        /// Seconds between full pulls.
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Pull only; do not open the push channel.
        #[arg(long)]
        no_push: bool,
    },
    /// Fetch today's alerts once and print them.
    Today,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        let (poll_interval_secs, push_enabled) = match self.command {
            Command::Watch {
                poll_interval,
                no_push,
            } => (poll_interval, no_push.then_some(false)),
            Command::Today => (None, None),
        };
        CliOverrides {
            base_url: self.base_url.clone(),
            poll_interval_secs,
            push_enabled,
            log_level: self.log_level.clone(),
        }
    }

    pub fn load_config(&self) -> Result<RetentionConfig, retention_core::ConfigError> {
        RetentionConfig::load(self.config.as_deref(), Some(&self.overrides()))
    }
}
