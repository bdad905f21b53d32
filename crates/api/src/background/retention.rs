//! Periodic expiry of idle pages.
//!
//! Spawns a background task that deletes pages whose last read is older
//! than the configured retention. Runs on a fixed interval using
//! `tokio::time::interval`, independently of request handling.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use notelet_pages::PageLifecycle;

/// Run the page retention loop.
///
/// Sweeps immediately on startup and then every `interval`, until
/// `cancel` is triggered. A failed sweep is logged and the loop carries
/// on; there is no caller to raise to.
pub async fn run(
    pages: PageLifecycle,
    retention_days: i64,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        retention_days,
        interval_secs = interval.as_secs(),
        "Page retention job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Page retention job stopping");
                break;
            }
            _ = ticker.tick() => {
                let retention = chrono::Duration::days(retention_days);
                match pages.expiry_sweep(retention, Utc::now()).await {
                    Ok(removed) => {
                        if removed > 0 {
                            tracing::info!(removed, "Page retention: expired idle pages");
                        } else {
                            tracing::debug!("Page retention: nothing to expire");
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "Page retention: sweep failed");
                    }
                }
            }
        }
    }
}
