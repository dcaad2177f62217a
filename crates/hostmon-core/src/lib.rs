//! hostmon-core — periodic host-metrics sampling engine.
//!
//! Provides:
//! - `collector` — metric sources over `/proc` (CPU ticks, meminfo, PID registry)
//!   behind a mockable `FileSystem` capability
//! - `metrics` — the guarded `SharedMetrics` record and its snapshots
//! - `sampler` — periodic samplers that turn raw counters into metric values
//! - `report` — console block and append-only log sink rendering
//! - `monitor` — lifecycle controller wiring samplers, reporter and shutdown
//! - `config` — validated interval and monitor configuration
//! - `shutdown` — cooperative cancellation token shared by every loop
//! - `fmt` — unit conversion and number formatting helpers

pub mod collector;
pub mod config;
pub mod fmt;
pub mod metrics;
pub mod monitor;
pub mod report;
pub mod sampler;
pub mod shutdown;

pub use config::{ConfigError, Interval, MonitorConfig};
pub use metrics::{MetricsSnapshot, SharedMetrics};
pub use monitor::{Monitor, MonitorState};
pub use shutdown::ShutdownToken;
