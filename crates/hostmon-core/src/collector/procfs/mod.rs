//! Metric sources for the Linux `/proc` filesystem.

pub mod parser;
mod source;

pub use parser::{CpuTicks, MemInfo, ParseError};
pub use source::{
    CollectError, CpuCounters, CpuSource, MemorySample, MemorySource, ProcessSource, ProcfsSource,
};
