//! Log output for the scheduler.
//!
//! Events from the `dialin` library and from the scheduler itself go to
//! stderr through a `tracing_subscriber::fmt` layer, filtered by `RUST_LOG`
//! (default `info`). Stdout is left for command output so `--json` results
//! can be piped.
//!
//! `--log-format json` switches to one JSON object per line, which is what
//! a log shipper tailing a cron log wants.

use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
};

use super::config::LogFormat;

pub fn init_telemetry(format: LogFormat) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_timer(ChronoLocal::rfc_3339()),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_timer(ChronoLocal::rfc_3339()),
            )
            .try_init()?,
    }

    Ok(())
}
