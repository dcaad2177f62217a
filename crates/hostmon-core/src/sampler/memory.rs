use tracing::warn;

use crate::collector::MemorySource;
use crate::metrics::{MemoryReading, SharedMetrics};

/// Publishes used/total memory and the used percentage.
pub struct MemorySampler<S: MemorySource> {
    source: S,
}

impl<S: MemorySource> MemorySampler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: MemorySource> super::Sampler for MemorySampler<S> {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn sample(&mut self, metrics: &SharedMetrics) {
        let sample = match self.source.sample_memory() {
            Ok(sample) => sample,
            Err(e) => {
                warn!(error = %e, "memory sample skipped");
                return;
            }
        };

        // total == 0 carries no usable data; keep whatever was there.
        if let Some(reading) = MemoryReading::from_kb(sample.total_kb, sample.available_kb) {
            metrics.update_memory(reading);
        }
    }
}
