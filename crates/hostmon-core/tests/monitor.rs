use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use hostmon_core::collector::{MockFs, RealFs};
use hostmon_core::report::LOG_TIMESTAMP_FORMAT;
use hostmon_core::{Interval, MetricsSnapshot, Monitor, MonitorConfig, MonitorState};

fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    condition()
}

fn all_sampled(snapshot: &MetricsSnapshot) -> bool {
    snapshot.cpu.is_some() && snapshot.memory.is_some() && snapshot.processes.is_some()
}

fn log_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_owned).collect())
        .unwrap_or_default()
}

/// Replaces a file in one step so a concurrent sampler never reads it half-written.
fn write_atomic(path: &Path, content: &str) {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, content).unwrap();
    std::fs::rename(&tmp, path).unwrap();
}

#[test]
fn log_file_gets_one_flushed_line_per_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("system_stats.log");

    let config = MonitorConfig::new(Interval::from_secs(1).unwrap())
        .with_log_file(&log_path)
        .with_max_reports(2);
    let mut monitor = Monitor::new(config, MockFs::typical_system());

    let handle = thread::spawn(move || {
        let mut out = Vec::new();
        monitor.start(&mut out).unwrap();
        let reports = monitor.run(&mut out).unwrap();
        monitor.stop(&mut out).unwrap();
        (reports, monitor.state(), String::from_utf8(out).unwrap())
    });

    // The first line is visible while the monitor is still running.
    assert!(wait_until(Duration::from_secs(3), || log_lines(&log_path).len() == 1));
    assert!(!handle.is_finished());

    let (reports, state, console) = handle.join().unwrap();
    assert_eq!(reports, 2);
    assert_eq!(state, MonitorState::Stopped);
    assert!(console.contains("Logging mode Enabled!"));
    assert_eq!(console.matches("Running Processes: 5").count(), 2);

    let lines = log_lines(&log_path);
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(&line[0..1], "[");
        assert!(
            chrono::NaiveDateTime::parse_from_str(&line[1..20], LOG_TIMESTAMP_FORMAT).is_ok(),
            "bad timestamp in {line:?}"
        );
        // 12000000 of 16303428 kB available
        assert_eq!(
            &line[20..],
            "] CPU: 0.00%, Memory: 4.10 GB/15.55 GB, Processes: 5"
        );
    }
}

#[test]
fn cpu_percentage_follows_counter_changes() {
    let proc_dir = tempfile::tempdir().unwrap();
    let root = proc_dir.path();
    // idle = 1000, total = 2000
    write_atomic(&root.join("stat"), "cpu  500 0 500 1000 0 0 0 0 0 0\n");
    write_atomic(
        &root.join("meminfo"),
        "MemTotal:       16777216 kB\nMemAvailable:    8388608 kB\n",
    );
    for pid in ["1", "42"] {
        std::fs::create_dir(root.join(pid)).unwrap();
    }
    std::fs::create_dir(root.join("self")).unwrap();

    let config = MonitorConfig::new(Interval::from_secs(1).unwrap()).with_proc_path(root);
    let mut monitor = Monitor::new(config, RealFs::new());
    let metrics = monitor.metrics();
    let mut out = Vec::new();
    monitor.start(&mut out).unwrap();

    assert!(wait_until(Duration::from_secs(2), || all_sampled(&metrics.snapshot())));
    let first = metrics.snapshot();
    assert_eq!(first.cpu_percent(), 0.0);
    assert_eq!(first.process_count(), 2);
    assert_eq!(first.memory().total_gb, 16.0);
    assert_eq!(first.memory().used_gb, 8.0);
    assert_eq!(first.memory().percent, 50.0);

    // idle = 1500, total = 3000
    write_atomic(&root.join("stat"), "cpu  750 0 750 1500 0 0 0 0 0 0\n");
    assert!(wait_until(Duration::from_secs(3), || metrics
        .snapshot()
        .cpu_percent()
        == 50.0));

    // No ticks elapsed: the value holds.
    thread::sleep(Duration::from_millis(1200));
    assert_eq!(metrics.snapshot().cpu_percent(), 50.0);

    monitor.stop(&mut out).unwrap();
}

#[test]
fn interrupt_stops_every_loop_within_one_interval() {
    let interval = Interval::from_secs(5).unwrap();
    let mut monitor = Monitor::new(MonitorConfig::new(interval), MockFs::typical_system());
    let token = monitor.shutdown_token();
    let mut out = Vec::new();
    monitor.start(&mut out).unwrap();

    let interrupter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(250));
        token.cancel()
    });

    let started = Instant::now();
    let reports = monitor.run(&mut out).unwrap();
    let summary = monitor.stop(&mut out).unwrap();
    let elapsed = started.elapsed();

    assert!(interrupter.join().unwrap());
    assert!(elapsed < interval.as_duration(), "took {elapsed:?}");
    assert_eq!(reports, 0);
    assert_eq!(summary.sampler_cycles.len(), 3);
    assert!(summary.sampler_cycles.iter().all(|(_, cycles)| *cycles == 1));
    assert_eq!(monitor.state(), MonitorState::Stopped);
    assert!(String::from_utf8(out)
        .unwrap()
        .ends_with("Exiting Gracefully, Goodbye!\n"));
}
