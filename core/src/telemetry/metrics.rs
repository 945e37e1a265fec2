use serde::Serialize;
use std::sync::Mutex;

/// Pass counters shared by a long-running front end.
pub struct MetricsRecorder {
    inner: Mutex<PassCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassCounts {
    pub passes: usize,
    pub empty: usize,
    pub rejected: usize,
    pub renders: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PassCounts::default()),
        }
    }

    pub fn record_pass(&self, shots: usize) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.passes += 1;
            if shots == 0 {
                counts.empty += 1;
            }
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.rejected += 1;
        }
    }

    pub fn record_render(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.renders += 1;
        }
    }

    pub fn snapshot(&self) -> PassCounts {
        self.inner
            .lock()
            .map(|counts| *counts)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
