//! Domain records for tracked pull requests and their reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PrPulseError, Result};

/// Lifecycle status of a tracked pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrStatus {
    /// Author has not yet picked reviewers (just opened).
    PendingReviewerChoice,
    /// Reviewers have been requested on GitHub.
    ReviewersAssigned,
    /// A reviewer asked for changes.
    ChangesRequested,
    /// At least one approving review landed.
    Approved,
    /// PR was closed or merged; excluded from the active count.
    Closed,
}

impl PrStatus {
    /// Stable string form (matches what the dashboard and logs show).
    pub fn as_str(self) -> &'static str {
        match self {
            PrStatus::PendingReviewerChoice => "pending_reviewer_choice",
            PrStatus::ReviewersAssigned => "reviewers_assigned",
            PrStatus::ChangesRequested => "changes_requested",
            PrStatus::Approved => "approved",
            PrStatus::Closed => "closed",
        }
    }
}

/// Review verdict as reported by GitHub's `review.state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
}

impl ReviewState {
    /// Parse GitHub's state string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "approved" => Ok(ReviewState::Approved),
            "changes_requested" => Ok(ReviewState::ChangesRequested),
            "commented" => Ok(ReviewState::Commented),
            "dismissed" => Ok(ReviewState::Dismissed),
            other => Err(PrPulseError::BadRequest(format!(
                "unknown review state: {other}"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewState::Approved => "approved",
            ReviewState::ChangesRequested => "changes_requested",
            ReviewState::Commented => "commented",
            ReviewState::Dismissed => "dismissed",
        }
    }
}

/// A tracked pull request.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub repo_name: String,
    pub pr_number: u64,
    pub title: String,
    pub status: PrStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_reminder_sent: Option<DateTime<Utc>>,
    pub reminder_count: u32,
}

impl PullRequest {
    pub fn open(repo_name: String, pr_number: u64, title: String, now: DateTime<Utc>) -> Self {
        Self {
            repo_name,
            pr_number,
            title,
            status: PrStatus::PendingReviewerChoice,
            created_at: now,
            updated_at: now,
            last_reminder_sent: None,
            reminder_count: 0,
        }
    }
}

/// A single submitted review on a tracked PR.
#[derive(Debug, Clone)]
pub struct Review {
    pub reviewer: String,
    pub state: ReviewState,
    pub created_at: DateTime<Utc>,
}

/// The two-counter payload served by `GET /stats` and consumed by the watch
/// client. Missing or non-numeric fields are a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub active_prs: u64,
    pub total_reviews: u64,
}
