use clap::Parser;

mod cli;
mod commands;

fn main() -> Result<(), anyhow::Error> {
    let cli = cli::Cli::parse();
    let config = cli.load_config()?;
    retention_core::init_tracing(&config.observability);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(commands::run(cli.command, config));

    // A pending fetch must not hold up exit.
    runtime.shutdown_timeout(std::time::Duration::from_secs(5));
    result
}
