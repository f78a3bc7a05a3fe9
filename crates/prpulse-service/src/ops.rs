//! HTTP handlers.
//!
//! - `GET /stats`            : the two dashboard counters (JSON)
//! - `POST /webhook`         : GitHub webhook intake (signature-checked)
//! - `POST /submit-reviewers`: reviewer selection from the dashboard
//! - `POST /check-reminders` : manual reminder sweep trigger
//! - `GET /healthz`          : liveness

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use prpulse_core::error::PrPulseError;
use prpulse_core::webhook::{self, WebhookEvent};

use crate::app_state::AppState;

fn error_response(err: &PrPulseError) -> Response {
    let code = err.client_code();
    let status = match code {
        prpulse_core::error::ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        prpulse_core::error::ClientCode::AuthFailed => StatusCode::UNAUTHORIZED,
        prpulse_core::error::ClientCode::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": code.as_str() }))).into_response()
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.bot().stats())
}

pub async fn webhook(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let signature = headers
        .get("X-Hub-Signature-256")
        .and_then(|v| v.to_str().ok());

    if !webhook::verify_signature(state.webhook_secret(), &body, signature) {
        return error_response(&PrPulseError::AuthFailed);
    }

    let event_name = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let event = match WebhookEvent::parse(event_name, &body) {
        Ok(ev) => ev,
        Err(e) => return error_response(&e),
    };

    let now = Utc::now();
    let result = match event {
        WebhookEvent::PullRequest(ev) => state.bot().handle_pr_event(ev, now).await,
        WebhookEvent::Review(ev) => state.bot().handle_review_event(ev, now).await,
        WebhookEvent::Ignored => Ok(()),
    };

    match result {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "success" }))).into_response(),
        Err(e) => {
            error!(error = %e, "webhook processing failed");
            error_response(&e)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitReviewers {
    pub repo_name: String,
    pub pr_number: u64,
    pub reviewers: Vec<String>,
}

pub async fn submit_reviewers(
    State(state): State<AppState>,
    Json(req): Json<SubmitReviewers>,
) -> Response {
    let reviewers: Vec<String> = req
        .reviewers
        .iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    match state
        .bot()
        .assign_reviewers(&req.repo_name, req.pr_number, &reviewers, Utc::now())
        .await
    {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "success" }))).into_response(),
        Err(e) => {
            error!(error = %e, "reviewer assignment failed");
            error_response(&e)
        }
    }
}

pub async fn check_reminders(State(state): State<AppState>) -> impl IntoResponse {
    state.bot().check_and_send_reminders(Utc::now()).await;
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "message": "Reminder check triggered" })),
    )
}
