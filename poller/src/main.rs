use payloads::{APIClient, RequestOptions};
use poller::telemetry::{get_subscriber, init_subscriber, log_error};
use poller::{Config, Poller};
use tracing::info;

/// Heatmap watcher
///
/// Polls the heatmap endpoint and logs a summary of every snapshot.
///
/// Environment variables can be set directly or loaded from a .env file in
/// the project root.
///
/// Required environment variables:
/// - BACKEND_URL: Backend origin, e.g. http://127.0.0.1:8000
///
/// Optional environment variables:
/// - REFRESH_INTERVAL_MS: Polling period (defaults to 10000)
/// - API_TOKEN: Bearer token used to check the session on startup
///
/// Example development command (with `cargo run -p dev-server` running):
/// BACKEND_URL=http://127.0.0.1:8000 REFRESH_INTERVAL_MS=2000 \
/// cargo run --bin heatmap-watch
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if available
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber);

    let config = Config::from_env()?;
    let client = APIClient {
        address: config.backend_url.clone(),
        inner_client: reqwest::Client::new(),
    };

    if let Some(token) = &config.api_token {
        match client
            .authenticated_request(
                "/api/health_check",
                RequestOptions::get(),
                Some(token),
            )
            .await
        {
            Ok(response) => {
                info!("Session check returned {}", response.status())
            }
            Err(e) => log_error(e),
        }
    }

    info!(
        "Watching {} every {:?}",
        config.backend_url, config.refresh_interval
    );
    let poller = Poller::spawn(client, config.refresh_interval);
    let mut updates = poller.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if let Some(error) = &state.error {
                    tracing::warn!("Heatmap unavailable: {}", error);
                } else if let Some(snapshot) = &state.data {
                    info!(
                        "Heatmap at {}: {} symbols, timeframes {:?}, {} cells",
                        snapshot.timestamp,
                        snapshot.symbols.len(),
                        snapshot.timeframes.as_deref().unwrap_or_default(),
                        snapshot.cells.len()
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("🛑 Stopping heatmap watcher");
    poller.shutdown();
    Ok(())
}
