//! Development server for heatmap UI development
//!
//! This binary runs the mock heatmap backend with a dataset that changes on
//! a timer, so the UI's polling is visible.
//!
//! Usage: cargo run -p dev-server
//!
//! Optional environment variables (or .env file):
//! - PORT: port to bind (defaults to an OS-assigned port)
//! - SNAPSHOT_INTERVAL_MS: how often the served snapshot changes (defaults
//!   to 5000)

use anyhow::Result;
use std::time::Duration;
use test_helpers::MockResponse;
use test_helpers::mock::DevDataset;
use tokio::time::interval;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    let subscriber = poller::telemetry::get_subscriber("info".into());
    poller::telemetry::init_subscriber(subscriber);

    let port: u16 = env_or("PORT", 0)?;
    let snapshot_interval_ms: u64 = env_or("SNAPSHOT_INTERVAL_MS", 5000)?;
    let snapshot_interval = Duration::from_millis(snapshot_interval_ms.max(1));

    info!("🚀 Starting heatmap development server");
    let backend = test_helpers::spawn_backend_on_port(port).await;
    let address = backend.address();
    info!("✅ Mock backend running on {}", address);

    let dataset = DevDataset::new();
    dataset.print_summary();
    start_snapshot_task(backend, dataset, snapshot_interval);

    info!("🎯 Development server ready!");
    info!("   UI:  cd ui && BACKEND_URL={} trunk serve", address);
    info!(
        "   CLI: BACKEND_URL={} cargo run --bin heatmap-watch",
        address
    );
    info!("👋 Press Ctrl+C to shutdown");

    // Keep server running until Ctrl+C
    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => Ok(value.trim().parse()?),
        Err(_) => Ok(default),
    }
}

/// Starts a background task that replaces the served snapshot on every
/// tick.
fn start_snapshot_task(
    backend: test_helpers::MockBackend,
    mut dataset: DevDataset,
    period: Duration,
) {
    tokio::spawn(async move {
        let mut interval = interval(period);
        info!("⏱️ Snapshot task started - updating every {:?}", period);

        loop {
            interval.tick().await;
            backend.set_default_response(MockResponse::json(
                200,
                dataset.next_snapshot(),
            ));
            tracing::debug!(
                "Serving new snapshot ({} requests so far)",
                backend.heatmap_hits()
            );
        }
    });
}
