//! BullBear API Server
//!
//! Serves the current market state, raw metrics, health and Prometheus metrics.
//! Every request evaluates fresh data; the server keeps no history.

use bullbear::config::Config;
use bullbear::core::http::start_server;
use bullbear::logging;
use bullbear::models::MetricKind;
use bullbear::services::DataFetcher;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let fetcher = Arc::new(DataFetcher::from_config(&config)?);

    info!("Starting BullBear API Server");
    info!(environment = %config.environment, "Environment");
    info!(
        use_mock_data = config.use_mock_data,
        btc_price = fetcher.provider_for(MetricKind::BtcPrice),
        ma50 = fetcher.provider_for(MetricKind::Ma50),
        "Metric providers"
    );

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, fetcher).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
