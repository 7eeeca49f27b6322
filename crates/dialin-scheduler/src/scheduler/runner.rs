use std::time::Duration;

use dialin::{DateSource, PhraseSupply, RandSource};
use tokio::{
    signal,
    task::block_in_place,
    time::{self, MissedTickBehavior},
};

/// Runs a supply check immediately and then once per `interval` until
/// Ctrl+C or SIGTERM.
///
/// A failed check is logged and retried at the next tick; only a signal
/// stops the loop.
pub async fn run_scheduler<R, C>(
    supply: &PhraseSupply<R, C>,
    interval: Duration,
) -> anyhow::Result<()>
where
    R: RandSource<u64>,
    C: DateSource,
{
    tracing::info!(
        ledger = %supply.ledger().path().display(),
        interval_hours = interval.as_secs() / 3600,
        min_days_ahead = supply.config().min_days_ahead,
        "Phrase scheduler started"
    );

    let mut ticker = time::interval(interval);
    // A laptop waking from sleep runs one check, not a burst of them.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = ticker.tick() => run_check(supply),
        }
    }

    tracing::info!("Phrase scheduler stopped");
    Ok(())
}

fn run_check<R, C>(supply: &PhraseSupply<R, C>)
where
    R: RandSource<u64>,
    C: DateSource,
{
    tracing::info!("Running scheduled supply check");

    match block_in_place(|| supply.ensure_supply()) {
        Ok(report) if report.is_noop() => {}
        Ok(report) => {
            if report.shortfall() > 0 {
                tracing::warn!(
                    requested = report.requested,
                    added = report.added.len(),
                    "Supply check fell short of the batch size"
                );
            }
            tracing::info!(
                added = report.added.len(),
                future = report.future_after,
                "Supply check completed"
            );
        }
        Err(e) => tracing::error!(error = %e, "Supply check failed"),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, stopping after the current check");
}
