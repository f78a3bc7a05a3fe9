//! Where snapshots come from.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use prpulse_core::error::{PrPulseError, Result};
use prpulse_core::model::StatsSnapshot;

/// A source of stats snapshots. The poller only sees this trait, so tests
/// run against in-process fakes.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self) -> Result<StatsSnapshot>;
}

/// HTTP source: one GET against a fixed endpoint, body parsed as the
/// two-field JSON snapshot. No timeout and no retry on the request.
pub struct HttpStatsSource {
    client: Client,
    endpoint: String,
}

impl HttpStatsSource {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch(&self) -> Result<StatsSnapshot> {
        debug!(endpoint = %self.endpoint, "fetching stats");

        let snapshot: StatsSnapshot = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| PrPulseError::Upstream(format!("stats request failed: {e}")))?
            .error_for_status()
            .map_err(|e| PrPulseError::Upstream(format!("stats request rejected: {e}")))?
            .json()
            .await
            .map_err(|e| PrPulseError::Upstream(format!("stats body invalid: {e}")))?;

        Ok(snapshot)
    }
}
