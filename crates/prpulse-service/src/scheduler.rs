//! Background reminder sweep.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::app_state::AppState;

/// Spawn the periodic reminder loop. The first sweep runs immediately; after
/// that the cadence comes from `reminders.check_interval_ms`. Sweep failures
/// are logged per PR inside the bot and never exit the loop.
pub fn spawn_reminder_loop(state: AppState) -> JoinHandle<()> {
    let period = Duration::from_millis(state.cfg().reminders.check_interval_ms);
    tokio::spawn(async move {
        info!(period_ms = period.as_millis() as u64, "reminder scheduler started");
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            state.bot().check_and_send_reminders(Utc::now()).await;
        }
    })
}
