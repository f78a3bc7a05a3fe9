#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! End-to-end bot behavior against an in-process GitHub fake.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use prpulse_core::error::Result;
use prpulse_core::webhook::WebhookEvent;
use prpulse_service::bot::Bot;
use prpulse_service::github::GitHubApi;

#[derive(Default)]
struct FakeGitHub {
    comments: Mutex<Vec<(String, u64, String)>>,
    requested: Mutex<Vec<(String, u64, Vec<String>)>>,
    reviewers: Mutex<Vec<String>>,
}

impl FakeGitHub {
    fn comments(&self) -> Vec<(String, u64, String)> {
        self.comments.lock().unwrap().clone()
    }

    fn set_reviewers(&self, logins: &[&str]) {
        *self.reviewers.lock().unwrap() = logins.iter().map(|s| s.to_string()).collect();
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn create_comment(&self, repo: &str, pr_number: u64, body: &str) -> Result<()> {
        self.comments
            .lock()
            .unwrap()
            .push((repo.to_string(), pr_number, body.to_string()));
        Ok(())
    }

    async fn requested_reviewers(&self, _repo: &str, _pr_number: u64) -> Result<Vec<String>> {
        Ok(self.reviewers.lock().unwrap().clone())
    }

    async fn request_reviewers(
        &self,
        repo: &str,
        pr_number: u64,
        reviewers: &[String],
    ) -> Result<()> {
        self.requested
            .lock()
            .unwrap()
            .push((repo.to_string(), pr_number, reviewers.to_vec()));
        Ok(())
    }
}

fn opened_event(number: u64) -> WebhookEvent {
    let body = format!(
        r#"{{
            "action": "opened",
            "pull_request": {{
                "number": {number},
                "title": "Add widget",
                "base": {{"repo": {{"full_name": "acme/widgets"}}}}
            }}
        }}"#
    );
    WebhookEvent::parse("pull_request", body.as_bytes()).unwrap()
}

fn review_event(number: u64, state: &str) -> WebhookEvent {
    let body = format!(
        r#"{{
            "review": {{"user": {{"login": "alice"}}, "state": "{state}"}},
            "pull_request": {{
                "number": {number},
                "base": {{"repo": {{"full_name": "acme/widgets"}}}}
            }}
        }}"#
    );
    WebhookEvent::parse("pull_request_review", body.as_bytes()).unwrap()
}

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn new_bot(gh: Arc<FakeGitHub>) -> Bot {
    Bot::new(gh, Duration::hours(24))
}

#[tokio::test]
async fn opened_pr_is_tracked_and_greeted() {
    let gh = Arc::new(FakeGitHub::default());
    let bot = new_bot(gh.clone());

    let WebhookEvent::PullRequest(ev) = opened_event(7) else {
        panic!("wrong event kind")
    };
    bot.handle_pr_event(ev, t0()).await.unwrap();

    assert_eq!(bot.stats().active_prs, 1);
    let comments = gh.comments();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].0, "acme/widgets");
    assert_eq!(comments[0].1, 7);
    assert!(comments[0].2.contains("pick specific reviewers"));
}

#[tokio::test]
async fn approval_posts_followup_and_counts_review() {
    let gh = Arc::new(FakeGitHub::default());
    let bot = new_bot(gh.clone());

    let WebhookEvent::PullRequest(ev) = opened_event(7) else {
        panic!("wrong event kind")
    };
    bot.handle_pr_event(ev, t0()).await.unwrap();

    let WebhookEvent::Review(ev) = review_event(7, "approved") else {
        panic!("wrong event kind")
    };
    bot.handle_review_event(ev, t0()).await.unwrap();

    assert_eq!(bot.stats().total_reviews, 1);
    let comments = gh.comments();
    assert!(comments.last().unwrap().2.contains("approved"));
}

#[tokio::test]
async fn review_for_untracked_pr_is_dropped_quietly() {
    let gh = Arc::new(FakeGitHub::default());
    let bot = new_bot(gh.clone());

    let WebhookEvent::Review(ev) = review_event(99, "commented") else {
        panic!("wrong event kind")
    };
    bot.handle_review_event(ev, t0()).await.unwrap();

    assert_eq!(bot.stats().total_reviews, 0);
    assert!(gh.comments().is_empty());
}

#[tokio::test]
async fn closed_pr_leaves_review_total_intact() {
    let gh = Arc::new(FakeGitHub::default());
    let bot = new_bot(gh.clone());

    let WebhookEvent::PullRequest(ev) = opened_event(7) else {
        panic!("wrong event kind")
    };
    bot.handle_pr_event(ev, t0()).await.unwrap();
    let WebhookEvent::Review(ev) = review_event(7, "commented") else {
        panic!("wrong event kind")
    };
    bot.handle_review_event(ev, t0()).await.unwrap();

    let body = r#"{
        "action": "closed",
        "pull_request": {
            "number": 7,
            "base": {"repo": {"full_name": "acme/widgets"}}
        }
    }"#;
    let WebhookEvent::PullRequest(ev) = WebhookEvent::parse("pull_request", body.as_bytes())
        .unwrap()
    else {
        panic!("wrong event kind")
    };
    bot.handle_pr_event(ev, t0()).await.unwrap();

    let snap = bot.stats();
    assert_eq!(snap.active_prs, 0);
    assert_eq!(snap.total_reviews, 1);
}

#[tokio::test]
async fn assign_reviewers_requests_and_confirms() {
    let gh = Arc::new(FakeGitHub::default());
    let bot = new_bot(gh.clone());

    let WebhookEvent::PullRequest(ev) = opened_event(7) else {
        panic!("wrong event kind")
    };
    bot.handle_pr_event(ev, t0()).await.unwrap();

    bot.assign_reviewers("acme/widgets", 7, &["carol".into(), "dave".into()], t0())
        .await
        .unwrap();

    let requested = gh.requested.lock().unwrap().clone();
    assert_eq!(requested.len(), 1);
    assert_eq!(requested[0].2, vec!["carol".to_string(), "dave".to_string()]);
    assert!(gh.comments().last().unwrap().2.contains("@carol @dave"));

    let err = bot.assign_reviewers("acme/widgets", 7, &[], t0()).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn reminder_sweep_tags_requested_reviewers_once() {
    let gh = Arc::new(FakeGitHub::default());
    gh.set_reviewers(&["carol"]);
    let bot = new_bot(gh.clone());

    let WebhookEvent::PullRequest(ev) = opened_event(7) else {
        panic!("wrong event kind")
    };
    let opened = t0();
    bot.handle_pr_event(ev, opened).await.unwrap();

    // Not yet stale: nothing happens.
    bot.check_and_send_reminders(opened + Duration::hours(1)).await;
    assert_eq!(gh.comments().len(), 1); // greeting only

    // Stale: the first reminder goes out.
    let later = opened + Duration::hours(25);
    bot.check_and_send_reminders(later).await;
    let comments = gh.comments();
    assert_eq!(comments.len(), 2);
    let reminder = &comments[1].2;
    assert!(reminder.contains("1st Reminder"));
    assert!(reminder.contains("@carol"));

    // Immediately re-running the sweep does not double-send.
    bot.check_and_send_reminders(later).await;
    assert_eq!(gh.comments().len(), 2);

    // Another day later the 2nd reminder goes out.
    bot.check_and_send_reminders(later + Duration::hours(25)).await;
    assert!(gh.comments()[2].2.contains("2nd Reminder"));
}

#[tokio::test]
async fn reminder_skipped_when_no_reviewers_requested() {
    let gh = Arc::new(FakeGitHub::default());
    let bot = new_bot(gh.clone());

    let WebhookEvent::PullRequest(ev) = opened_event(7) else {
        panic!("wrong event kind")
    };
    let opened = t0();
    bot.handle_pr_event(ev, opened).await.unwrap();

    bot.check_and_send_reminders(opened + Duration::hours(25)).await;
    assert_eq!(gh.comments().len(), 1); // greeting only, no reminder
}
