//! Top-level facade crate for prpulse.
//!
//! Re-exports the domain core, the review-bot service, and the watch client
//! so users can depend on a single crate.

pub mod core {
    pub use prpulse_core::*;
}

pub mod service {
    pub use prpulse_service::*;
}

pub mod watch {
    pub use prpulse_watch::*;
}
