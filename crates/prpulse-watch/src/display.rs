//! Display targets for the two counters.

use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed target keys, mirroring the two named elements on the dashboard.
pub const ACTIVE_PRS_TARGET: &str = "active-prs";
pub const TOTAL_REVIEWS_TARGET: &str = "total-reviews";

/// Somewhere counter text can be written. Implementations keep whatever was
/// last written until the next successful write.
pub trait StatsDisplay: Send + Sync {
    fn set_text(&self, target: &str, value: &str);
}

/// Terminal display: keeps the latest text per target and reprints the pair
/// whenever either changes.
#[derive(Default)]
pub struct TermDisplay {
    values: Mutex<HashMap<String, String>>,
}

impl TermDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to a target, if any.
    pub fn get(&self, target: &str) -> Option<String> {
        match self.values.lock() {
            Ok(v) => v.get(target).cloned(),
            Err(_) => None,
        }
    }
}

impl StatsDisplay for TermDisplay {
    fn set_text(&self, target: &str, value: &str) {
        let Ok(mut values) = self.values.lock() else {
            return;
        };
        values.insert(target.to_string(), value.to_string());

        let dash = "-".to_string();
        let active = values.get(ACTIVE_PRS_TARGET).unwrap_or(&dash);
        let total = values.get(TOTAL_REVIEWS_TARGET).unwrap_or(&dash);
        println!("active PRs: {active}    total reviews: {total}");
    }
}
