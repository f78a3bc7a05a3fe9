//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(ops::stats))
        .route("/webhook", post(ops::webhook))
        .route("/submit-reviewers", post(ops::submit_reviewers))
        .route("/check-reminders", post(ops::check_reminders))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
