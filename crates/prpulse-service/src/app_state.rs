//! Shared application state for the prpulse service.

use std::sync::Arc;

use chrono::Duration;

use crate::bot::Bot;
use crate::config::ServiceConfig;
use crate::github::GitHubApi;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    bot: Bot,
    webhook_secret: Vec<u8>,
}

impl AppState {
    /// Build application state around a GitHub client and the webhook secret.
    /// Secrets come from the environment, never from the config file.
    pub fn new(cfg: ServiceConfig, github: Arc<dyn GitHubApi>, webhook_secret: Vec<u8>) -> Self {
        let stale_after = Duration::milliseconds(cfg.reminders.stale_after_ms as i64);
        let bot = Bot::new(github, stale_after);
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                bot,
                webhook_secret,
            }),
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn bot(&self) -> &Bot {
        &self.inner.bot
    }

    pub fn webhook_secret(&self) -> &[u8] {
        &self.inner.webhook_secret
    }
}
