use tracing::{debug, warn};

use crate::collector::{CpuCounters, CpuSource};
use crate::metrics::{CpuReading, SharedMetrics};

/// Turns cumulative tick counters into a utilization percentage over the
/// window between two successful reads.
pub struct CpuSampler<S: CpuSource> {
    source: S,
    /// Counters from the last successful read.
    prev: Option<CpuCounters>,
    /// Last computed percentage, reused when a window has no usable delta.
    percent: f64,
}

impl<S: CpuSource> CpuSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            prev: None,
            percent: 0.0,
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Folds a new counter read into the state and returns the percentage.
    ///
    /// The percentage is left unchanged on the first read, when no ticks
    /// elapsed, and when a counter went backwards (reset).
    pub fn advance(&mut self, current: CpuCounters) -> f64 {
        if let Some(prev) = self.prev.replace(current) {
            match (
                current.total.checked_sub(prev.total),
                current.idle.checked_sub(prev.idle),
            ) {
                (Some(0), _) => {}
                (Some(delta_total), Some(delta_idle)) => {
                    let busy = delta_total.saturating_sub(delta_idle);
                    self.percent = (100.0 * busy as f64 / delta_total as f64).clamp(0.0, 100.0);
                }
                _ => {
                    debug!(?prev, ?current, "cpu counters went backwards, keeping last value");
                }
            }
        }
        self.percent
    }
}

impl<S: CpuSource> super::Sampler for CpuSampler<S> {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn sample(&mut self, metrics: &SharedMetrics) {
        match self.source.sample_cpu_counters() {
            Ok(counters) => {
                let percent = self.advance(counters);
                metrics.update_cpu(CpuReading { percent });
            }
            Err(e) => warn!(error = %e, "cpu sample skipped"),
        }
    }
}
