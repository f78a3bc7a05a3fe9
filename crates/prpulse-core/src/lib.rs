//! prpulse core: domain model, error types, and webhook payload parsing.
//!
//! This crate defines the PR/review domain records, the stats snapshot wire
//! shape, and the webhook signature/event contracts shared by the service and
//! the watch client. It intentionally carries no transport or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PrPulseError`/`Result` so production
//! processes do not crash on malformed input or bad traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod webhook;

/// Shared result type.
pub use error::{PrPulseError, Result};
pub use model::StatsSnapshot;
