//! The three metric sources and their `/proc` implementation.
//!
//! Sources are stateless per call: every sample re-reads the counter file.
//! Any state derived across calls (CPU deltas) lives in the samplers.

use std::path::PathBuf;

use tracing::warn;

use crate::collector::procfs::parser::{is_pid_entry, parse_cpu_ticks, parse_meminfo};
use crate::collector::traits::FileSystem;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// Counter file or registry could not be read.
    Io(std::io::Error),
    /// Counter file was read but did not contain the expected fields.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// Cumulative CPU counters: idle (idle + iowait) and total ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounters {
    pub idle: u64,
    pub total: u64,
}

/// Raw memory figures in kB. A field that was not found reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySample {
    pub total_kb: u64,
    pub available_kb: u64,
}

pub trait CpuSource: Send {
    /// Reads the aggregate CPU tick counters.
    fn sample_cpu_counters(&self) -> Result<CpuCounters, CollectError>;
}

pub trait MemorySource: Send {
    /// Reads total and available memory.
    ///
    /// Only an unreadable interface is an error. A missing field is reported
    /// as a diagnostic and comes back as 0.
    fn sample_memory(&self) -> Result<MemorySample, CollectError>;
}

pub trait ProcessSource: Send {
    /// Counts the live processes in the process registry.
    fn count_processes(&self) -> Result<u64, CollectError>;
}

/// All three metric sources backed by a proc filesystem root.
#[derive(Debug, Clone)]
pub struct ProcfsSource<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
}

impl<F: FileSystem> ProcfsSource<F> {
    /// Creates a source over `proc_path` (usually "/proc").
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Returns true if the proc root is visible through the filesystem.
    pub fn is_available(&self) -> bool {
        self.fs.exists(&self.proc_path)
    }
}

impl<F: FileSystem> CpuSource for ProcfsSource<F> {
    fn sample_cpu_counters(&self) -> Result<CpuCounters, CollectError> {
        let content = self.fs.read_to_string(&self.proc_path.join("stat"))?;
        let ticks = parse_cpu_ticks(&content).map_err(|e| CollectError::Parse(e.message))?;

        Ok(CpuCounters {
            idle: ticks.idle_ticks(),
            total: ticks.total_ticks(),
        })
    }
}

impl<F: FileSystem> MemorySource for ProcfsSource<F> {
    fn sample_memory(&self) -> Result<MemorySample, CollectError> {
        let path = self.proc_path.join("meminfo");
        let content = self.fs.read_to_string(&path)?;
        let info = parse_meminfo(&content);

        if info.mem_total.unwrap_or(0) == 0 {
            warn!(path = %path.display(), "MemTotal not found in meminfo");
        }
        if info.mem_available.unwrap_or(0) == 0 {
            warn!(path = %path.display(), "MemAvailable not found in meminfo");
        }

        Ok(MemorySample {
            total_kb: info.mem_total.unwrap_or(0),
            available_kb: info.mem_available.unwrap_or(0),
        })
    }
}

impl<F: FileSystem> ProcessSource for ProcfsSource<F> {
    fn count_processes(&self) -> Result<u64, CollectError> {
        let entries = self.fs.read_dir(&self.proc_path)?;

        let count = entries
            .iter()
            .filter_map(|path| path.file_name())
            .filter(|name| name.to_str().is_some_and(is_pid_entry))
            .count();

        Ok(count as u64)
    }
}
