//! Periodic samplers.
//!
//! A sampler wraps one metric source, derives the reported value and writes
//! its field group into `SharedMetrics`. `run_sampler` drives any sampler on
//! its own thread until the shutdown token is cancelled.

mod cpu;
mod memory;
mod process;

pub use cpu::CpuSampler;
pub use memory::MemorySampler;
pub use process::ProcessSampler;

use std::sync::Arc;

use tracing::debug;

use crate::config::Interval;
use crate::metrics::SharedMetrics;
use crate::shutdown::ShutdownToken;

/// One metric's sampling step.
pub trait Sampler: Send {
    /// Short name used for thread names and log fields.
    fn name(&self) -> &'static str;

    /// Reads the source once and, on success, publishes into `metrics`.
    ///
    /// Source failures are contained here: the previous values stay in place.
    fn sample(&mut self, metrics: &SharedMetrics);
}

/// Runs `sampler` every `interval` until `shutdown` is cancelled.
///
/// Samples first, then sleeps; the flag is checked on every wake. Returns the
/// number of cycles performed.
pub fn run_sampler<S: Sampler>(
    mut sampler: S,
    metrics: Arc<SharedMetrics>,
    shutdown: ShutdownToken,
    interval: Interval,
) -> u64 {
    let mut cycles: u64 = 0;

    while shutdown.is_running() {
        sampler.sample(&metrics);
        cycles += 1;

        if !shutdown.sleep(interval.as_duration()) {
            break;
        }
    }

    debug!(sampler = sampler.name(), cycles, "sampler stopped");
    cycles
}
