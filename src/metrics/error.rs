use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    /// A metric category could not be read this tick.
    #[error("{category} unavailable: {reason}")]
    SourceUnavailable {
        category: &'static str,
        reason: String,
    },

    /// One process vanished or was unreadable mid-scan.
    #[error("process {pid} skipped: {reason}")]
    TransientProcess { pid: u32, reason: String },

    #[error("clock anomaly between ticks: {0}")]
    ClockAnomaly(ClockAnomaly),
}

impl MetricsError {
    pub fn unavailable(category: &'static str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            category,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockAnomaly {
    #[error("clock went backwards by {0:?}")]
    Backwards(Duration),
    #[error("no time elapsed")]
    Stalled,
    #[error("{elapsed:?} elapsed, expected at most {limit:?}")]
    Jump { elapsed: Duration, limit: Duration },
}

impl From<ClockAnomaly> for MetricsError {
    fn from(anomaly: ClockAnomaly) -> Self {
        Self::ClockAnomaly(anomaly)
    }
}
