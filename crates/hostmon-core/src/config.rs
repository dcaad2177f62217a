//! Monitor configuration: the sampling interval and optional outputs.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "system_stats.log";

/// Default proc filesystem root.
pub const DEFAULT_PROC_PATH: &str = "/proc";

/// Error type for configuration failures detected at startup.
#[derive(Debug)]
pub enum ConfigError {
    /// Interval is not an integer number of seconds >= 1.
    InvalidInterval(String),
    /// Log file could not be opened for appending.
    LogSink {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidInterval(value) => write!(
                f,
                "invalid interval '{}': must be a whole number of seconds, at least 1",
                value
            ),
            ConfigError::LogSink { path, source } => {
                write!(f, "cannot open log file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidInterval(_) => None,
            ConfigError::LogSink { source, .. } => Some(source),
        }
    }
}

/// Sampling and reporting cadence, in whole seconds (>= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval(u64);

impl Interval {
    pub const MIN_SECS: u64 = 1;

    pub fn from_secs(secs: u64) -> Result<Self, ConfigError> {
        if secs < Self::MIN_SECS {
            return Err(ConfigError::InvalidInterval(secs.to_string()));
        }
        Ok(Self(secs))
    }

    pub fn secs(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(Self::MIN_SECS)
    }
}

impl FromStr for Interval {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secs: u64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidInterval(s.to_string()))?;
        Self::from_secs(secs).map_err(|_| ConfigError::InvalidInterval(s.to_string()))
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Everything the lifecycle controller needs to start.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub interval: Interval,
    /// Base path to proc filesystem (usually "/proc").
    pub proc_path: PathBuf,
    /// Append one line per report here when set.
    pub log_path: Option<PathBuf>,
    /// Stop on its own after this many reports.
    pub max_reports: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Interval::default(),
            proc_path: PathBuf::from(DEFAULT_PROC_PATH),
            log_path: None,
            max_reports: None,
        }
    }
}

impl MonitorConfig {
    pub fn new(interval: Interval) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    pub fn with_proc_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.proc_path = path.into();
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    pub fn with_max_reports(mut self, reports: u64) -> Self {
        self.max_reports = Some(reports);
        self
    }
}
