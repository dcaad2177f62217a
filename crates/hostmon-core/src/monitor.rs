//! Lifecycle controller.
//!
//! `Monitor` owns the configuration, the shared metrics and the shutdown
//! token, and moves through `Starting → Running → Stopping → Stopped`:
//!
//! - `start` opens the optional log sink and spawns one thread per sampler.
//! - `run` is the reporter loop on the calling thread: sleep one interval,
//!   check the run flag, snapshot under the guard, render outside it.
//! - `stop` cancels the token, joins every sampler thread and closes the sink.
//!
//! Shutdown latency is bounded by one interval: every loop checks the token
//! only while sleeping.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use crate::collector::{FileSystem, ProcfsSource};
use crate::config::MonitorConfig;
use crate::metrics::SharedMetrics;
use crate::report::{LogSink, Reporter};
use crate::sampler::{CpuSampler, MemorySampler, ProcessSampler, Sampler, run_sampler};
use crate::shutdown::ShutdownToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// How a run ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopSummary {
    /// Reports emitted by the reporter loop.
    pub reports: u64,
    /// Cycles performed by each sampler that exited cleanly.
    pub sampler_cycles: Vec<(&'static str, u64)>,
    /// Samplers whose thread panicked.
    pub panicked: Vec<&'static str>,
}

struct Worker {
    name: &'static str,
    handle: JoinHandle<u64>,
}

/// Controller for the samplers and the reporter loop.
pub struct Monitor<F: FileSystem + Clone + 'static> {
    config: MonitorConfig,
    fs: F,
    metrics: Arc<SharedMetrics>,
    shutdown: ShutdownToken,
    state: MonitorState,
    workers: Vec<Worker>,
    reporter: Option<Reporter>,
}

impl<F: FileSystem + Clone + 'static> Monitor<F> {
    /// Creates a monitor in the `Starting` state. Nothing runs until `start`.
    pub fn new(config: MonitorConfig, fs: F) -> Self {
        Self {
            config,
            fs,
            metrics: Arc::new(SharedMetrics::new()),
            shutdown: ShutdownToken::new(),
            state: MonitorState::Starting,
            workers: Vec::new(),
            reporter: None,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Token to hand to an interrupt handler; cancelling it stops every loop.
    pub fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }

    pub fn metrics(&self) -> Arc<SharedMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Opens the log sink, launches the samplers and enters `Running`.
    ///
    /// A log file that cannot be opened is reported and the run continues
    /// without persistence.
    pub fn start(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.state != MonitorState::Starting {
            return Err(io::Error::other(format!(
                "monitor cannot start from state {:?}",
                self.state
            )));
        }

        let interval = self.config.interval;

        let sink = match self.config.log_path.as_deref() {
            Some(path) => match LogSink::open(path) {
                Ok(sink) => {
                    writeln!(
                        out,
                        "Logging mode Enabled! Statistics are appended to {}",
                        path.display()
                    )?;
                    Some(sink)
                }
                Err(e) => {
                    error!(error = %e, "logging disabled");
                    None
                }
            },
            None => None,
        };
        self.reporter = Some(Reporter::new(interval, sink));

        let source = ProcfsSource::new(self.fs.clone(), self.config.proc_path.clone());
        if !source.is_available() {
            warn!(
                proc_path = %self.config.proc_path.display(),
                "proc root not found, metrics will stay at zero"
            );
        }

        self.spawn(CpuSampler::new(source.clone()))?;
        self.spawn(MemorySampler::new(source.clone()))?;
        self.spawn(ProcessSampler::new(source))?;

        writeln!(out, "System Resource Monitor (Interval of {})", interval.secs())?;
        out.flush()?;

        self.state = MonitorState::Running;
        info!(
            interval_secs = interval.secs(),
            samplers = self.workers.len(),
            "monitor running"
        );
        Ok(())
    }

    fn spawn<S: Sampler + 'static>(&mut self, sampler: S) -> io::Result<()> {
        let name = sampler.name();
        let metrics = Arc::clone(&self.metrics);
        let shutdown = self.shutdown.clone();
        let interval = self.config.interval;

        let handle = thread::Builder::new()
            .name(format!("sampler-{}", name))
            .spawn(move || run_sampler(sampler, metrics, shutdown, interval))?;

        debug!(sampler = name, "sampler started");
        self.workers.push(Worker { name, handle });
        Ok(())
    }

    /// Reporter loop. Returns when the token is cancelled, or after
    /// `max_reports` reports (which cancels the token itself).
    pub fn run(&mut self, out: &mut impl Write) -> io::Result<u64> {
        let Some(reporter) = self.reporter.as_mut() else {
            return Err(io::Error::other("monitor is not running"));
        };
        let interval = self.config.interval;
        let max_reports = self.config.max_reports;

        loop {
            // Checked before emitting, so a limit of zero prints nothing.
            if max_reports.is_some_and(|max| reporter.reports() >= max) {
                debug!(reports = reporter.reports(), "report limit reached");
                self.shutdown.cancel();
                break;
            }
            if !self.shutdown.sleep(interval.as_duration()) {
                break;
            }
            let snapshot = self.metrics.snapshot();
            reporter.emit(&snapshot, out)?;
        }

        if self.state == MonitorState::Running {
            self.state = MonitorState::Stopping;
        }
        Ok(reporter.reports())
    }

    /// Stops every loop, waits for the samplers and releases the log sink.
    ///
    /// Safe to call from any state; calling it again after `Stopped` is a
    /// no-op that returns an empty summary.
    pub fn stop(&mut self, out: &mut impl Write) -> io::Result<StopSummary> {
        if self.state == MonitorState::Stopped {
            return Ok(StopSummary::default());
        }
        self.state = MonitorState::Stopping;
        if self.shutdown.cancel() {
            info!("shutdown requested");
        }

        let mut summary = StopSummary::default();
        for worker in self.workers.drain(..) {
            match worker.handle.join() {
                Ok(cycles) => summary.sampler_cycles.push((worker.name, cycles)),
                Err(_) => {
                    error!(sampler = worker.name, "sampler thread panicked");
                    summary.panicked.push(worker.name);
                }
            }
        }

        if let Some(reporter) = self.reporter.take() {
            summary.reports = reporter.reports();
            if let Err(e) = reporter.finish() {
                warn!(error = %e, "failed to close log file");
            }
        }

        self.state = MonitorState::Stopped;
        info!(reports = summary.reports, "monitor stopped");
        writeln!(out, "Exiting Gracefully, Goodbye!")?;
        out.flush()?;
        Ok(summary)
    }
}

impl<F: FileSystem + Clone + 'static> Drop for Monitor<F> {
    fn drop(&mut self) {
        // Never leave detached sampler threads behind.
        self.shutdown.cancel();
        for worker in self.workers.drain(..) {
            let _ = worker.handle.join();
        }
    }
}
