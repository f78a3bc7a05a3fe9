//! GitHub REST client used for comments and reviewer requests.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use prpulse_core::error::{PrPulseError, Result};

/// The slice of the GitHub API the bot uses. Behind a trait so the bot and
/// the reminder sweep can run against an in-process fake in tests.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Post an issue comment on a PR.
    async fn create_comment(&self, repo: &str, pr_number: u64, body: &str) -> Result<()>;

    /// Logins currently requested for review on a PR.
    async fn requested_reviewers(&self, repo: &str, pr_number: u64) -> Result<Vec<String>>;

    /// Request reviews from the given logins.
    async fn request_reviewers(&self, repo: &str, pr_number: u64, reviewers: &[String])
        -> Result<()>;
}

pub struct HttpGitHub {
    client: Client,
    api_base: String,
    token: String,
}

impl HttpGitHub {
    pub fn new(api_base: String, token: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            token,
        }
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "prpulse")
    }
}

#[derive(Debug, Deserialize)]
struct PrDetails {
    #[serde(default)]
    requested_reviewers: Vec<Login>,
}

#[derive(Debug, Deserialize)]
struct Login {
    login: String,
}

#[async_trait]
impl GitHubApi for HttpGitHub {
    async fn create_comment(&self, repo: &str, pr_number: u64, body: &str) -> Result<()> {
        let url = format!("{}/repos/{}/issues/{}/comments", self.api_base, repo, pr_number);
        debug!(url = %url, "posting PR comment");

        let resp = self
            .auth(self.client.post(&url))
            .json(&json!({ "body": body }))
            .send()
            .await
            .map_err(|e| PrPulseError::Upstream(format!("comment request failed: {e}")))?;

        if resp.status() != StatusCode::CREATED {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(PrPulseError::Upstream(format!(
                "comment rejected ({status}): {text}"
            )));
        }
        info!(repo = %repo, pr = pr_number, "comment posted");
        Ok(())
    }

    async fn requested_reviewers(&self, repo: &str, pr_number: u64) -> Result<Vec<String>> {
        let url = format!("{}/repos/{}/pulls/{}", self.api_base, repo, pr_number);
        debug!(url = %url, "fetching PR details");

        let details: PrDetails = self
            .auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| PrPulseError::Upstream(format!("pr fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| PrPulseError::Upstream(format!("pr fetch rejected: {e}")))?
            .json()
            .await
            .map_err(|e| PrPulseError::Upstream(format!("pr body invalid: {e}")))?;

        Ok(details
            .requested_reviewers
            .into_iter()
            .map(|u| u.login)
            .collect())
    }

    async fn request_reviewers(
        &self,
        repo: &str,
        pr_number: u64,
        reviewers: &[String],
    ) -> Result<()> {
        let url = format!(
            "{}/repos/{}/pulls/{}/requested_reviewers",
            self.api_base, repo, pr_number
        );
        debug!(url = %url, count = reviewers.len(), "requesting reviewers");

        self.auth(self.client.post(&url))
            .json(&json!({ "reviewers": reviewers }))
            .send()
            .await
            .map_err(|e| PrPulseError::Upstream(format!("reviewer request failed: {e}")))?
            .error_for_status()
            .map_err(|e| PrPulseError::Upstream(format!("reviewer request rejected: {e}")))?;

        info!(repo = %repo, pr = pr_number, "reviewers requested");
        Ok(())
    }
}
