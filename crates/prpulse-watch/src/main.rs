//! prpulse watch binary: poll `/stats` and keep the two counters on screen.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use prpulse_watch::{HttpStatsSource, StatsPoller, TermDisplay};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/stats";

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let endpoint =
        std::env::var("PRPULSE_STATS_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

    tracing::info!(endpoint = %endpoint, "prpulse-watch starting");

    let source = Arc::new(HttpStatsSource::new(endpoint));
    let display = Arc::new(TermDisplay::new());
    StatsPoller::new(source, display).run().await;
}
