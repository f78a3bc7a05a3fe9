use serde::Deserialize;

use prpulse_core::error::{PrPulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub github: GitHubSection,

    #[serde(default)]
    pub reminders: RemindersSection,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PrPulseError::BadRequest(
                "unsupported config version".into(),
            ));
        }

        self.github.validate()?;
        self.reminders.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubSection {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

impl GitHubSection {
    pub fn validate(&self) -> Result<()> {
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(PrPulseError::BadRequest(
                "github.api_base must be an http(s) URL".into(),
            ));
        }
        if self.api_base.ends_with('/') {
            return Err(PrPulseError::BadRequest(
                "github.api_base must not end with a slash".into(),
            ));
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemindersSection {
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,

    #[serde(default = "default_stale_after_ms")]
    pub stale_after_ms: u64,
}

impl Default for RemindersSection {
    fn default() -> Self {
        Self {
            check_interval_ms: default_check_interval_ms(),
            stale_after_ms: default_stale_after_ms(),
        }
    }
}

impl RemindersSection {
    pub fn validate(&self) -> Result<()> {
        if !(60_000..=86_400_000).contains(&self.check_interval_ms) {
            return Err(PrPulseError::BadRequest(
                "reminders.check_interval_ms must be between 60000 and 86400000".into(),
            ));
        }
        if !(600_000..=604_800_000).contains(&self.stale_after_ms) {
            return Err(PrPulseError::BadRequest(
                "reminders.stale_after_ms must be between 600000 and 604800000".into(),
            ));
        }
        if self.stale_after_ms <= self.check_interval_ms {
            return Err(PrPulseError::BadRequest(
                "reminders.stale_after_ms must be greater than check_interval_ms".into(),
            ));
        }
        Ok(())
    }
}

// Hourly sweep, 24h staleness threshold.
fn default_check_interval_ms() -> u64 {
    3_600_000
}
fn default_stale_after_ms() -> u64 {
    86_400_000
}
