//! Periodic refresh loop, the auto-refresh timer of the storefront.
//!
//! Subscribes a logging observer, fetches once up front, then refreshes on
//! a fixed interval until Ctrl+C or SIGTERM. The timer is unconditional: a
//! failed refresh keeps the last-known-good list and simply waits for the
//! next tick.

use std::time::Duration;

use glowcart_catalog::ProductStore;
use tokio::time::MissedTickBehavior;

use crate::source::AppSource;

/// Run the refresh loop until a shutdown signal arrives.
///
/// # Errors
///
/// Infallible in practice; fetch failures are absorbed as store error
/// state and logged.
pub async fn run(
    store: &ProductStore<AppSource>,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    store.subscribe(|products| {
        tracing::info!(count = products.len(), "catalog updated");
    });

    if let Err(err) = store.refresh().await {
        tracing::warn!(error = %err, "initial fetch failed, retrying on the timer");
    }

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval() fires immediately; the initial fetch above already covered it.
    ticker.tick().await;

    tracing::info!(interval_secs = interval.as_secs(), "watching catalog");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let _ = store.refresh().await;
            }
            () = shutdown_signal() => break,
        }
    }

    tracing::info!("Shutdown signal received, stopping watch loop");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
