//! The polling loop.

use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::display::{StatsDisplay, ACTIVE_PRS_TARGET, TOTAL_REVIEWS_TARGET};
use crate::source::StatsSource;

/// Fixed polling cadence.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Periodic stats poller: one immediate tick, then one every 30 seconds,
/// forever. Each tick is its own spawned request; a slow response may land
/// after a later tick's.
pub struct StatsPoller {
    source: Arc<dyn StatsSource>,
    display: Arc<dyn StatsDisplay>,
}

impl StatsPoller {
    pub fn new(source: Arc<dyn StatsSource>, display: Arc<dyn StatsDisplay>) -> Self {
        Self { source, display }
    }

    /// One fetch-and-render pass. All failures funnel through the single
    /// error log here; on failure the display keeps its previous values.
    pub async fn poll_once(source: &dyn StatsSource, display: &dyn StatsDisplay) {
        match source.fetch().await {
            Ok(snapshot) => {
                display.set_text(ACTIVE_PRS_TARGET, &snapshot.active_prs.to_string());
                display.set_text(TOTAL_REVIEWS_TARGET, &snapshot.total_reviews.to_string());
            }
            Err(e) => {
                error!(error = %e, "stats poll failed");
            }
        }
    }

    /// Run the loop. Never returns; there is deliberately no cancellation
    /// hook or tick budget.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            let source = Arc::clone(&self.source);
            let display = Arc::clone(&self.display);
            tokio::spawn(async move {
                Self::poll_once(source.as_ref(), display.as_ref()).await;
            });
        }
    }
}
