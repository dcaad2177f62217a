use tracing::warn;

use crate::collector::ProcessSource;
use crate::metrics::SharedMetrics;

/// Publishes the number of live processes.
pub struct ProcessSampler<S: ProcessSource> {
    source: S,
}

impl<S: ProcessSource> ProcessSampler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: ProcessSource> super::Sampler for ProcessSampler<S> {
    fn name(&self) -> &'static str {
        "process"
    }

    fn sample(&mut self, metrics: &SharedMetrics) {
        match self.source.count_processes() {
            Ok(count) => metrics.update_processes(count),
            Err(e) => warn!(error = %e, "process count skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{MockFs, ProcfsSource};
    use crate::sampler::Sampler;

    #[test]
    fn test_counts_digit_entries_only() {
        let metrics = SharedMetrics::new();
        ProcessSampler::new(ProcfsSource::new(MockFs::process_registry(), "/proc"))
            .sample(&metrics);

        assert_eq!(metrics.snapshot().processes, Some(2));
    }

    #[test]
    fn test_tracks_processes_coming_and_going() {
        let metrics = SharedMetrics::new();
        let mut fs = MockFs::typical_system();

        ProcessSampler::new(ProcfsSource::new(fs.clone(), "/proc")).sample(&metrics);
        assert_eq!(metrics.snapshot().process_count(), 5);

        fs.remove("/proc/1234");
        fs.add_pids("/proc", &[9001, 9002]);
        ProcessSampler::new(ProcfsSource::new(fs, "/proc")).sample(&metrics);
        assert_eq!(metrics.snapshot().process_count(), 6);
    }

    #[test]
    fn test_missing_registry_keeps_previous_count() {
        let metrics = SharedMetrics::new();
        metrics.update_processes(17);

        ProcessSampler::new(ProcfsSource::new(MockFs::new(), "/proc")).sample(&metrics);
        assert_eq!(metrics.snapshot().processes, Some(17));
    }
}
