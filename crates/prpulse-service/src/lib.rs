//! prpulse service library entry.
//!
//! This crate wires the webhook intake, PR registry, GitHub client, reminder
//! scheduler, and stats endpoint into a cohesive review-bot service. It is
//! intended to be consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod bot;
pub mod config;
pub mod github;
pub mod ops;
pub mod registry;
pub mod router;
pub mod scheduler;
