//! Rendering of metric snapshots to the console and to the append-only log.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tracing::warn;

use crate::config::{ConfigError, Interval};
use crate::fmt::format_fixed2;
use crate::metrics::MetricsSnapshot;

const RULE: &str = "-------------------------------------------------";

/// Timestamp layout of log lines.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the per-cycle console block. Unsampled fields show as zero.
pub fn render_console(snapshot: &MetricsSnapshot, interval: Interval) -> String {
    let memory = snapshot.memory();
    format!(
        "{RULE}\n\
         CPU Usage: {}%\n\
         Memory Usage: {} GB/{} GB ({}%)\n\
         Running Processes: {}\n\
         {RULE}\n\
         (Updating every {} second(s)...Press Ctrl+C to exit)\n",
        format_fixed2(snapshot.cpu_percent()),
        format_fixed2(memory.used_gb),
        format_fixed2(memory.total_gb),
        format_fixed2(memory.percent),
        snapshot.process_count(),
        interval.secs(),
    )
}

/// Renders one log line, without the trailing newline.
///
/// `[YYYY-MM-DD HH:MM:SS] CPU: X.XX%, Memory: U.UU GB/T.TT GB, Processes: N`
pub fn render_log_line<Tz: TimeZone>(snapshot: &MetricsSnapshot, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let memory = snapshot.memory();
    format!(
        "[{}] CPU: {}%, Memory: {} GB/{} GB, Processes: {}",
        at.format(LOG_TIMESTAMP_FORMAT),
        format_fixed2(snapshot.cpu_percent()),
        format_fixed2(memory.used_gb),
        format_fixed2(memory.total_gb),
        snapshot.process_count(),
    )
}

/// Append-only log file, flushed after every line.
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    file: File,
}

impl LogSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ConfigError::LogSink {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line and flushes it so concurrent readers see it immediately.
    pub fn append(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{}", line)?;
        self.file.flush()
    }

    /// Flushes and closes the file.
    pub fn close(mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_data()
    }
}

/// Emits snapshots to the console writer and, if configured, the log sink.
pub struct Reporter {
    interval: Interval,
    sink: Option<LogSink>,
    reports: u64,
}

impl Reporter {
    pub fn new(interval: Interval, sink: Option<LogSink>) -> Self {
        Self {
            interval,
            sink,
            reports: 0,
        }
    }

    pub fn reports(&self) -> u64 {
        self.reports
    }

    /// Writes one report. Console failures are returned; a failing log sink
    /// is reported and the console output still goes out.
    pub fn emit(&mut self, snapshot: &MetricsSnapshot, out: &mut impl Write) -> io::Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            let line = render_log_line(snapshot, &Local::now());
            if let Err(e) = sink.append(&line) {
                warn!(path = %sink.path().display(), error = %e, "failed to append log line");
            }
        }

        out.write_all(render_console(snapshot, self.interval).as_bytes())?;
        out.flush()?;
        self.reports += 1;
        Ok(())
    }

    /// Closes the log sink, if any.
    pub fn finish(self) -> io::Result<()> {
        match self.sink {
            Some(sink) => sink.close(),
            None => Ok(()),
        }
    }
}
