//! Concurrent in-memory registry of tracked PRs and their reviews.
//!
//! The registry is the source of truth for the `/stats` counters and for the
//! reminder sweep. Entries are keyed by `(repo_name, pr_number)`; closed PRs
//! stay in the map so their reviews keep counting toward the total.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use prpulse_core::model::{PrStatus, PullRequest, Review, StatsSnapshot};

/// Registry key: repository full name + PR number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrKey {
    pub repo_name: String,
    pub pr_number: u64,
}

impl PrKey {
    pub fn new(repo_name: impl Into<String>, pr_number: u64) -> Self {
        Self {
            repo_name: repo_name.into(),
            pr_number,
        }
    }
}

#[derive(Debug)]
struct PrEntry {
    pr: PullRequest,
    reviews: Vec<Review>,
}

#[derive(Default)]
pub struct PrRegistry {
    entries: DashMap<PrKey, PrEntry>,
}

impl PrRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register a newly opened PR. Re-delivery of the same `opened` event
    /// resets the entry (GitHub redelivers on retry).
    pub fn upsert_open(&self, repo_name: &str, pr_number: u64, title: String, now: DateTime<Utc>) {
        let key = PrKey::new(repo_name, pr_number);
        self.entries.insert(
            key,
            PrEntry {
                pr: PullRequest::open(repo_name.to_string(), pr_number, title, now),
                reviews: Vec::new(),
            },
        );
    }

    /// Mark a PR closed. Unknown PRs are a no-op (we may not have seen the
    /// open event).
    pub fn close(&self, repo_name: &str, pr_number: u64, now: DateTime<Utc>) {
        if let Some(mut e) = self.entries.get_mut(&PrKey::new(repo_name, pr_number)) {
            e.pr.status = PrStatus::Closed;
            e.pr.updated_at = now;
        }
    }

    /// Set the lifecycle status of a tracked PR. Returns false when unknown.
    pub fn set_status(
        &self,
        repo_name: &str,
        pr_number: u64,
        status: PrStatus,
        now: DateTime<Utc>,
    ) -> bool {
        match self.entries.get_mut(&PrKey::new(repo_name, pr_number)) {
            Some(mut e) => {
                e.pr.status = status;
                e.pr.updated_at = now;
                true
            }
            None => false,
        }
    }

    /// Append a review to a tracked PR. Returns false when the PR is unknown
    /// (the review is then dropped, matching the original bot).
    pub fn record_review(&self, repo_name: &str, pr_number: u64, review: Review) -> bool {
        match self.entries.get_mut(&PrKey::new(repo_name, pr_number)) {
            Some(mut e) => {
                e.pr.updated_at = review.created_at;
                e.reviews.push(review);
                true
            }
            None => false,
        }
    }

    /// Snapshot the two dashboard counters: PRs not yet closed, and every
    /// review ever recorded (including on closed PRs).
    pub fn stats(&self) -> StatsSnapshot {
        let mut active_prs = 0u64;
        let mut total_reviews = 0u64;
        for e in self.entries.iter() {
            if e.pr.status != PrStatus::Closed {
                active_prs += 1;
            }
            total_reviews += e.reviews.len() as u64;
        }
        StatsSnapshot {
            active_prs,
            total_reviews,
        }
    }

    /// Keys of non-closed PRs that are due a reminder: never reminded and
    /// created before the threshold, or last reminded before the threshold.
    pub fn due_for_reminder(&self, now: DateTime<Utc>, stale_after: Duration) -> Vec<PrKey> {
        let threshold = now - stale_after;
        self.entries
            .iter()
            .filter(|e| e.pr.status != PrStatus::Closed)
            .filter(|e| match e.pr.last_reminder_sent {
                None => e.pr.created_at <= threshold,
                Some(last) => last <= threshold,
            })
            .map(|e| e.key().clone())
            .collect()
    }

    /// Record that a reminder went out; returns the new reminder count.
    pub fn mark_reminder_sent(&self, key: &PrKey, now: DateTime<Utc>) -> Option<u32> {
        let mut e = self.entries.get_mut(key)?;
        e.pr.reminder_count += 1;
        e.pr.last_reminder_sent = Some(now);
        e.pr.updated_at = now;
        Some(e.pr.reminder_count)
    }

    /// Reminder count for a tracked PR (next reminder is count + 1).
    pub fn reminder_count(&self, key: &PrKey) -> Option<u32> {
        self.entries.get(key).map(|e| e.pr.reminder_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn stats_counts_open_prs_and_all_reviews() {
        let reg = PrRegistry::new();
        let now = t0();
        reg.upsert_open("acme/widgets", 1, "one".into(), now);
        reg.upsert_open("acme/widgets", 2, "two".into(), now);
        reg.record_review(
            "acme/widgets",
            1,
            Review {
                reviewer: "alice".into(),
                state: prpulse_core::model::ReviewState::Approved,
                created_at: now,
            },
        );
        reg.close("acme/widgets", 1, now);

        let snap = reg.stats();
        assert_eq!(snap.active_prs, 1);
        // Reviews on closed PRs still count toward the total.
        assert_eq!(snap.total_reviews, 1);
    }

    #[test]
    fn review_on_unknown_pr_is_dropped() {
        let reg = PrRegistry::new();
        let ok = reg.record_review(
            "acme/widgets",
            9,
            Review {
                reviewer: "bob".into(),
                state: prpulse_core::model::ReviewState::Commented,
                created_at: t0(),
            },
        );
        assert!(!ok);
        assert_eq!(reg.stats().total_reviews, 0);
    }

    #[test]
    fn due_for_reminder_honors_threshold_and_status() {
        let reg = PrRegistry::new();
        let opened = t0();
        let now = opened + Duration::hours(25);
        reg.upsert_open("acme/widgets", 1, "stale".into(), opened);
        reg.upsert_open("acme/widgets", 2, "fresh".into(), now);
        reg.upsert_open("acme/widgets", 3, "closed".into(), opened);
        reg.close("acme/widgets", 3, now);

        let due = reg.due_for_reminder(now, Duration::hours(24));
        assert_eq!(due, vec![PrKey::new("acme/widgets", 1)]);

        // A recent reminder pushes the PR out of the due set.
        reg.mark_reminder_sent(&PrKey::new("acme/widgets", 1), now);
        assert!(reg.due_for_reminder(now, Duration::hours(24)).is_empty());

        // And it comes due again once the reminder itself goes stale.
        let later = now + Duration::hours(25);
        assert_eq!(
            reg.due_for_reminder(later, Duration::hours(24)),
            vec![PrKey::new("acme/widgets", 1)]
        );
    }

    #[test]
    fn mark_reminder_sent_increments_count() {
        let reg = PrRegistry::new();
        let now = t0();
        reg.upsert_open("acme/widgets", 1, "pr".into(), now);
        let key = PrKey::new("acme/widgets", 1);
        assert_eq!(reg.mark_reminder_sent(&key, now), Some(1));
        assert_eq!(reg.mark_reminder_sent(&key, now), Some(2));
        assert_eq!(reg.reminder_count(&key), Some(2));
    }
}
