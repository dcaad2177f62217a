//! Metric sources for Linux.
//!
//! Each source reads one OS-exposed counter interface and returns a raw domain
//! value, or a `CollectError` when the interface is unavailable. All reads go
//! through the `FileSystem` trait so the same code runs against the real
//! `/proc` or against an in-memory `MockFs` fixture.
//!
//! # Architecture
//!
//! ```text
//!   ┌────────────┐  ┌──────────────┐  ┌───────────────┐
//!   │ CpuSource  │  │ MemorySource │  │ ProcessSource │   (traits)
//!   └─────┬──────┘  └──────┬───────┘  └───────┬───────┘
//!         └────────────────┼──────────────────┘
//!                   ┌──────▼───────┐
//!                   │ ProcfsSource │  /proc/stat, /proc/meminfo, /proc/<pid>
//!                   └──────┬───────┘
//!                   ┌──────▼──────┐
//!                   │ FileSystem  │ (trait)
//!                   └──────┬──────┘
//!                 ┌────────┴────────┐
//!           ┌─────▼─────┐     ┌─────▼─────┐
//!           │  RealFs   │     │  MockFs   │
//!           └───────────┘     └───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use hostmon_core::collector::{CpuSource, MockFs, ProcfsSource};
//!
//! let source = ProcfsSource::new(MockFs::typical_system(), "/proc");
//! let counters = source.sample_cpu_counters().unwrap();
//! assert!(counters.total >= counters.idle);
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{
    CollectError, CpuCounters, CpuSource, MemorySample, MemorySource, ProcessSource, ProcfsSource,
};
pub use traits::{FileSystem, RealFs};
