//! hostmond - periodic host metrics monitor.
//!
//! Samples CPU utilization, memory usage and process count from /proc on
//! independent threads and prints a report every interval, optionally
//! appending each report to a log file.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use hostmon_core::collector::RealFs;
use hostmon_core::config::{DEFAULT_LOG_FILE, DEFAULT_PROC_PATH};
use hostmon_core::{Interval, Monitor, MonitorConfig};

/// Periodic host metrics monitor.
#[derive(Parser, Debug)]
#[command(name = "hostmond", about = "Periodic host metrics monitor", version)]
struct Args {
    /// Sampling and report interval in whole seconds (>= 1).
    #[arg(long, default_value = "1", value_parser = parse_interval)]
    interval: Interval,

    /// Append every report to the log file.
    #[arg(long)]
    logging: bool,

    /// Log file used with --logging.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PROC_PATH)]
    proc_path: PathBuf,

    /// Stop after this many reports instead of running until interrupted.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    count: Option<u64>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn monitor_config(&self) -> MonitorConfig {
        let mut config = MonitorConfig::new(self.interval).with_proc_path(&self.proc_path);
        if self.logging {
            config = config.with_log_file(&self.log_file);
        }
        if let Some(count) = self.count {
            config = config.with_max_reports(count);
        }
        config
    }
}

fn parse_interval(s: &str) -> Result<Interval, String> {
    s.parse::<Interval>().map_err(|e| e.to_string())
}

/// Initializes the tracing subscriber. Diagnostics share stdout with the
/// reports; the default level keeps them to warnings so the report block
/// stays readable.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["hostmond", "hostmon_core"] {
        match format!("{}={}", target, level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("invalid log directive for {}: {}", target, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    // Every exit path, including rejected arguments, ends with status 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            print!("{}", e.render());
            return;
        }
    };

    init_logging(args.verbose, args.quiet);

    let config = args.monitor_config();
    info!(
        "hostmond {} starting: interval={}, proc={}, log={:?}",
        env!("CARGO_PKG_VERSION"),
        config.interval,
        config.proc_path.display(),
        config.log_path
    );

    let mut monitor = Monitor::new(config, RealFs::new());

    let token = monitor.shutdown_token();
    if let Err(e) = ctrlc::set_handler(move || {
        if token.cancel() {
            info!("Received shutdown signal");
        }
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    // Locked per write: sampler threads log to stdout concurrently.
    let mut out = io::stdout();

    if let Err(e) = monitor.start(&mut out) {
        error!("Failed to start monitor: {}", e);
    } else if let Err(e) = monitor.run(&mut out) {
        error!("Report loop failed: {}", e);
    }

    match monitor.stop(&mut out) {
        Ok(summary) => {
            for (sampler, cycles) in &summary.sampler_cycles {
                info!("Sampler {} ran {} cycles", sampler, cycles);
            }
            for sampler in &summary.panicked {
                warn!("Sampler {} exited abnormally", sampler);
            }
        }
        Err(e) => error!("Shutdown failed: {}", e),
    }
    let _ = out.flush();
}
