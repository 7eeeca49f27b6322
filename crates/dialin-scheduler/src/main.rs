#![doc = include_str!("../README.md")]

mod scheduler;

use clap::Parser;
use scheduler::commands;
use scheduler::config::{CliArgs, Command, SchedulerConfig};
use scheduler::runner::run_scheduler;
use scheduler::telemetry::init_telemetry;

// Using mimalloc to keep allocation behavior the same across glibc and musl
// builds.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = SchedulerConfig::try_from(args)?;

    init_telemetry(config.log_format)?;
    log_startup_info(&config);

    let supply = scheduler::build_supply(&config)?;

    let out = &mut std::io::stdout();
    match &config.command {
        Command::Run => run_scheduler(&supply, config.interval).await,
        Command::Check => commands::check(&supply, config.json, out),
        Command::Generate { count } => commands::generate(&supply, *count, config.json, out),
        Command::Submit { phrase, date } => {
            commands::submit(&supply, phrase, *date, config.json, out)
        }
        Command::Today { date } => commands::today(&supply, *date, config.json, out),
        Command::Audit => commands::audit(&supply, config.json, out),
    }
}

fn log_startup_info(config: &SchedulerConfig) {
    if cfg!(debug_assertions) {
        tracing::debug!("Starting phrase scheduler with full config: {:#?}", config);
    } else {
        tracing::debug!(
            ledger = %config.ledger.display(),
            min_days_ahead = config.supply.min_days_ahead,
            batch_size = config.supply.batch_size,
            "Starting phrase scheduler"
        );
    }
}
