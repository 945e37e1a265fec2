use log::{debug, info, warn};

/// Thin wrapper so every pass logs under the core's target.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!(target: "shotcore", "{}", message);
    }

    pub fn trace_stage(&self, stage: &str, remaining: usize) {
        debug!(target: "shotcore", "stage {} kept {} shots", stage, remaining);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: "shotcore", "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
