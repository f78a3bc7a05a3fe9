//! GitHub webhook contracts: signature verification and event payloads.
//!
//! Payload structs are deliberately lenient (no `deny_unknown_fields`):
//! GitHub delivers far more fields than the bot consumes, and new ones appear
//! without notice. Only the fields the service acts on are modeled.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::{PrPulseError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Verify an `X-Hub-Signature-256` header against the raw request body.
///
/// The header carries `sha256=<hex>`. An absent or malformed header verifies
/// false; comparison is constant-time via the MAC itself.
pub fn verify_signature(secret: &[u8], payload: &[u8], signature: Option<&str>) -> bool {
    let Some(signature) = signature else {
        return false;
    };
    let Some(hex_digest) = signature.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_digest) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

/// Render the signature header value for a body (used by tests and tooling).
pub fn sign(secret: &[u8], payload: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| PrPulseError::Internal(format!("bad hmac key: {e}")))?;
    mac.update(payload);
    Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}

#[derive(Debug, Deserialize)]
pub struct RepoRef {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct BaseRef {
    pub repo: RepoRef,
}

#[derive(Debug, Deserialize)]
pub struct PrRef {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    pub base: BaseRef,
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRef {
    pub user: UserRef,
    pub state: String,
}

/// `pull_request` event body.
#[derive(Debug, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PrRef,
}

/// `pull_request_review` event body.
#[derive(Debug, Deserialize)]
pub struct ReviewEvent {
    pub review: ReviewRef,
    pub pull_request: PrRef,
}

/// A webhook delivery, dispatched by the `X-GitHub-Event` header.
#[derive(Debug)]
pub enum WebhookEvent {
    PullRequest(PullRequestEvent),
    Review(ReviewEvent),
    /// Event types the bot does not handle.
    Ignored,
}

impl WebhookEvent {
    /// Parse a delivery from its event name and raw JSON body.
    ///
    /// Unknown event names are `Ignored` rather than errors; a malformed body
    /// for a handled event is a `BadRequest`.
    pub fn parse(event_name: &str, body: &[u8]) -> Result<Self> {
        match event_name {
            "pull_request" => {
                let ev: PullRequestEvent = serde_json::from_slice(body).map_err(|e| {
                    PrPulseError::BadRequest(format!("invalid pull_request payload: {e}"))
                })?;
                Ok(WebhookEvent::PullRequest(ev))
            }
            "pull_request_review" => {
                let ev: ReviewEvent = serde_json::from_slice(body).map_err(|e| {
                    PrPulseError::BadRequest(format!("invalid review payload: {e}"))
                })?;
                Ok(WebhookEvent::Review(ev))
            }
            other => {
                tracing::debug!(event = %other, "ignoring unhandled webhook event");
                Ok(WebhookEvent::Ignored)
            }
        }
    }
}
