//! Latest value of every tracked metric, behind one guard.
//!
//! Each sampler owns a disjoint group of fields and replaces its whole group
//! in a single critical section, so a snapshot never observes a half-written
//! group. Groups from different samplers may come from different cycles.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::fmt::{kb_to_gb, percent_of};

/// CPU utilization over the last sampling window, in percent (0..=100).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuReading {
    pub percent: f64,
}

/// Memory usage derived from one meminfo read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryReading {
    pub used_gb: f64,
    pub total_gb: f64,
    pub percent: f64,
}

impl MemoryReading {
    /// Builds a reading from raw kB figures. Returns `None` when `total_kb`
    /// is zero, since there is nothing meaningful to report.
    pub fn from_kb(total_kb: u64, available_kb: u64) -> Option<Self> {
        let used_kb = total_kb.saturating_sub(available_kb);
        let percent = percent_of(used_kb, total_kb)?;

        Some(Self {
            used_gb: kb_to_gb(used_kb),
            total_gb: kb_to_gb(total_kb),
            percent,
        })
    }
}

/// Consistent copy of all metric groups. `None` means never sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub cpu: Option<CpuReading>,
    pub memory: Option<MemoryReading>,
    pub processes: Option<u64>,
}

impl MetricsSnapshot {
    pub fn cpu_percent(&self) -> f64 {
        self.cpu.map(|c| c.percent).unwrap_or(0.0)
    }

    pub fn memory(&self) -> MemoryReading {
        self.memory.unwrap_or_default()
    }

    pub fn process_count(&self) -> u64 {
        self.processes.unwrap_or(0)
    }
}

/// The guarded record shared by all samplers (writers) and the reporter (reader).
#[derive(Debug, Default)]
pub struct SharedMetrics {
    inner: Mutex<MetricsSnapshot>,
}

impl SharedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_cpu(&self, reading: CpuReading) {
        self.lock().cpu = Some(reading);
    }

    pub fn update_memory(&self, reading: MemoryReading) {
        self.lock().memory = Some(reading);
    }

    pub fn update_processes(&self, count: u64) {
        self.lock().processes = Some(count);
    }

    /// Copies every field under one acquisition of the guard.
    pub fn snapshot(&self) -> MetricsSnapshot {
        *self.lock()
    }

    // Updates are single assignments: data behind a poisoned guard is whole.
    fn lock(&self) -> MutexGuard<'_, MetricsSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
