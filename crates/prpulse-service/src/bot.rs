//! Review-bot orchestration: webhook event handling, reviewer assignment,
//! and the reminder sweep.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};

use prpulse_core::error::{PrPulseError, Result};
use prpulse_core::model::{PrStatus, Review, ReviewState, StatsSnapshot};
use prpulse_core::webhook::{PullRequestEvent, ReviewEvent};

use crate::github::GitHubApi;
use crate::registry::{PrKey, PrRegistry};

const GREETING: &str = "\u{1f44b} Hi! Would you like to pick specific reviewers for this PR? \
If yes, please mention them in a comment. \
If not, I'll automatically assign reviewers for you. \
Please respond within 24 hours.";

const APPROVED_FOLLOWUP: &str = "\u{2705} This PR has been approved! \
Would you like another round of review? \
Please let me know in a comment.";

const CHANGES_REQUESTED: &str = "\u{1f4dd} Changes have been requested. \
Please address the feedback and let me know when you're ready for another review.";

pub struct Bot {
    registry: PrRegistry,
    github: Arc<dyn GitHubApi>,
    stale_after: Duration,
}

impl Bot {
    pub fn new(github: Arc<dyn GitHubApi>, stale_after: Duration) -> Self {
        Self {
            registry: PrRegistry::new(),
            github,
            stale_after,
        }
    }

    pub fn registry(&self) -> &PrRegistry {
        &self.registry
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.registry.stats()
    }

    /// Handle a `pull_request` event. `opened` registers the PR and posts the
    /// greeting; `closed` marks it closed; other actions are ignored.
    pub async fn handle_pr_event(&self, ev: PullRequestEvent, now: DateTime<Utc>) -> Result<()> {
        let repo = ev.pull_request.base.repo.full_name.as_str();
        let number = ev.pull_request.number;

        match ev.action.as_str() {
            "opened" => {
                let title = ev.pull_request.title.clone().unwrap_or_default();
                self.registry.upsert_open(repo, number, title, now);
                info!(repo = %repo, pr = number, "tracking new PR");
                self.github.create_comment(repo, number, GREETING).await
            }
            "closed" => {
                self.registry.close(repo, number, now);
                info!(repo = %repo, pr = number, "PR closed");
                Ok(())
            }
            other => {
                info!(repo = %repo, pr = number, action = %other, "ignoring PR action");
                Ok(())
            }
        }
    }

    /// Handle a `pull_request_review` event: record the review and post the
    /// matching follow-up comment for approvals and change requests.
    pub async fn handle_review_event(&self, ev: ReviewEvent, now: DateTime<Utc>) -> Result<()> {
        let repo = ev.pull_request.base.repo.full_name.as_str();
        let number = ev.pull_request.number;
        let state = ReviewState::parse(&ev.review.state)?;

        let recorded = self.registry.record_review(
            repo,
            number,
            Review {
                reviewer: ev.review.user.login.clone(),
                state,
                created_at: now,
            },
        );
        if !recorded {
            warn!(repo = %repo, pr = number, "review for untracked PR dropped");
            return Ok(());
        }

        match state {
            ReviewState::Approved => {
                self.registry.set_status(repo, number, PrStatus::Approved, now);
                self.github.create_comment(repo, number, APPROVED_FOLLOWUP).await
            }
            ReviewState::ChangesRequested => {
                self.registry
                    .set_status(repo, number, PrStatus::ChangesRequested, now);
                self.github.create_comment(repo, number, CHANGES_REQUESTED).await
            }
            ReviewState::Commented | ReviewState::Dismissed => Ok(()),
        }
    }

    /// Request the given reviewers on GitHub and confirm with a comment.
    pub async fn assign_reviewers(
        &self,
        repo: &str,
        pr_number: u64,
        reviewers: &[String],
        now: DateTime<Utc>,
    ) -> Result<()> {
        if reviewers.is_empty() {
            return Err(PrPulseError::BadRequest("reviewers must not be empty".into()));
        }

        self.github.request_reviewers(repo, pr_number, reviewers).await?;
        self.registry
            .set_status(repo, pr_number, PrStatus::ReviewersAssigned, now);

        let tags = reviewers
            .iter()
            .map(|r| format!("@{r}"))
            .collect::<Vec<_>>()
            .join(" ");
        let body = format!("Reviewers assigned: {tags}. Thanks for picking!");
        self.github.create_comment(repo, pr_number, &body).await
    }

    /// Sweep for PRs due a reminder and nag their requested reviewers.
    /// A failure on one PR is logged and does not abort the sweep.
    pub async fn check_and_send_reminders(&self, now: DateTime<Utc>) {
        info!("checking for PRs needing review reminders");

        for key in self.registry.due_for_reminder(now, self.stale_after) {
            if let Err(e) = self.send_reminder(&key, now).await {
                error!(repo = %key.repo_name, pr = key.pr_number, error = %e, "reminder failed");
            }
        }
    }

    async fn send_reminder(&self, key: &PrKey, now: DateTime<Utc>) -> Result<()> {
        let reviewers = self
            .github
            .requested_reviewers(&key.repo_name, key.pr_number)
            .await?;

        if reviewers.is_empty() {
            info!(repo = %key.repo_name, pr = key.pr_number, "no reviewers to remind");
            return Ok(());
        }

        let tags = reviewers
            .iter()
            .map(|r| format!("@{r}"))
            .collect::<Vec<_>>()
            .join(" ");
        let nth = self.registry.reminder_count(key).unwrap_or(0) + 1;

        let body = format!(
            "\u{1f514} {} Reminder\n\nHey {}! This PR has been waiting for your review.\n\
             Please take a look when you have a chance. If you're unable to review, \
             please let us know so we can find another reviewer.",
            ordinal(nth),
            tags
        );

        self.github
            .create_comment(&key.repo_name, key.pr_number, &body)
            .await?;
        self.registry.mark_reminder_sent(key, now);

        info!(repo = %key.repo_name, pr = key.pr_number, nth, "review reminder sent");
        Ok(())
    }
}

/// English ordinal: 1 -> "1st", 2 -> "2nd", 11 -> "11th", 22 -> "22nd".
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_handle_teens() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(112), "112th");
    }
}
