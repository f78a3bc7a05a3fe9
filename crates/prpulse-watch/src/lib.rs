//! prpulse watch: the dashboard stats poller.
//!
//! One loop: fetch the two-counter snapshot from the service's `/stats`
//! endpoint, write both values as text into the two fixed display targets,
//! repeat on a fixed 30-second timer. Failures are logged at a single point
//! and leave the previously displayed values untouched. There is no retry,
//! no caching, no request timeout, and no cancellation hook; ticks are
//! independent requests with no ordering guarantee between them.

pub mod display;
pub mod poller;
pub mod source;

pub use display::{StatsDisplay, TermDisplay, ACTIVE_PRS_TARGET, TOTAL_REVIEWS_TARGET};
pub use poller::StatsPoller;
pub use source::{HttpStatsSource, StatsSource};
