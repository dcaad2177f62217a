use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const EXIT_BOUND: Duration = Duration::from_secs(10);

/// Runs the daemon to completion and returns its status and stdout. Fails the
/// test if the process is still alive after `EXIT_BOUND`.
fn run_hostmond(args: &[&str]) -> (ExitStatus, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hostmond"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let deadline = Instant::now() + EXIT_BOUND;
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            panic!("hostmond {args:?} did not exit within {EXIT_BOUND:?}");
        }
        thread::sleep(Duration::from_millis(50));
    };

    let mut stdout = String::new();
    child
        .stdout
        .take()
        .unwrap()
        .read_to_string(&mut stdout)
        .unwrap();
    (status, stdout)
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn empty_proc_root_reports_zeros_and_exits() {
    let proc_dir = tempfile::tempdir().unwrap();

    let (status, stdout) = run_hostmond(&["--proc-path", path_arg(proc_dir.path()), "--count", "2"]);

    assert!(status.success());
    assert!(stdout.contains("cpu sample skipped"), "{stdout}");
    assert!(stdout.contains("memory sample skipped"), "{stdout}");
    assert_eq!(stdout.matches("CPU Usage: 0.00%").count(), 2, "{stdout}");
    assert_eq!(stdout.matches("Running Processes: 0").count(), 2, "{stdout}");
    assert!(stdout.ends_with("Exiting Gracefully, Goodbye!\n"), "{stdout}");
}

#[test]
fn missing_proc_root_exits() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-proc");

    let (status, stdout) = run_hostmond(&["--proc-path", path_arg(&missing), "--count", "2"]);

    assert!(status.success());
    assert!(stdout.contains("proc root not found"), "{stdout}");
    assert!(stdout.contains("process count skipped"), "{stdout}");
    assert_eq!(stdout.matches("Memory Usage: 0.00 GB/0.00 GB (0.00%)").count(), 2);
    assert!(stdout.contains("Exiting Gracefully, Goodbye!"), "{stdout}");
}

#[test]
fn meminfo_without_available_reads_fully_used() {
    let proc_dir = tempfile::tempdir().unwrap();
    let root = proc_dir.path();
    std::fs::write(root.join("stat"), "cpu  500 0 500 1000 0 0 0 0 0 0\n").unwrap();
    std::fs::write(
        root.join("meminfo"),
        "MemTotal:        8388608 kB\nMemFree:         2097152 kB\n",
    )
    .unwrap();
    for pid in ["1", "42"] {
        std::fs::create_dir(root.join(pid)).unwrap();
    }

    let (status, stdout) = run_hostmond(&["--proc-path", path_arg(root), "--count", "1"]);

    assert!(status.success());
    assert!(stdout.contains("MemAvailable not found in meminfo"), "{stdout}");
    assert!(stdout.contains("Memory Usage: 8.00 GB/8.00 GB (100.00%)"), "{stdout}");
    assert!(stdout.contains("Running Processes: 2"), "{stdout}");
    assert!(stdout.ends_with("Exiting Gracefully, Goodbye!\n"), "{stdout}");
}

#[test]
fn log_file_receives_one_line_per_report() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("stats.log");
    let proc_dir = tempfile::tempdir().unwrap();

    let (status, stdout) = run_hostmond(&[
        "--proc-path",
        path_arg(proc_dir.path()),
        "--logging",
        "--log-file",
        path_arg(&log),
        "--count",
        "2",
    ]);

    assert!(status.success());
    assert!(stdout.starts_with("Logging mode Enabled!"), "{stdout}");
    let content = std::fs::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().all(|l| l.ends_with("] CPU: 0.00%, Memory: 0.00 GB/0.00 GB, Processes: 0")));
}

#[test]
fn rejected_arguments_exit_zero_without_reporting() {
    for argv in [&["--count", "0"][..], &["--interval", "0"], &["--bogus"]] {
        let (status, stdout) = run_hostmond(argv);

        assert!(status.success(), "{argv:?}");
        assert!(stdout.contains("error"), "{argv:?}: {stdout}");
        assert!(!stdout.contains("CPU Usage"), "{argv:?}: {stdout}");
    }
}
