//! Pre-built `/proc` layouts for tests.

use super::filesystem::MockFs;

const TYPICAL_STAT: &str = "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
";

const TYPICAL_MEMINFO: &str = "\
MemTotal:       16303428 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
";

impl MockFs {
    /// A small host: four CPUs, 16 GB of RAM and five processes alongside the
    /// usual non-PID entries of `/proc`.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/stat", TYPICAL_STAT);
        fs.add_file("/proc/meminfo", TYPICAL_MEMINFO);
        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_pids("/proc", &[1, 2, 42, 1234, 5678]);
        fs.add_dir("/proc/self");
        fs.add_dir("/proc/sys");
        fs.add_dir("/proc/net");
        fs
    }

    /// Exactly the registry `{1, 42, self, abc}`: two PIDs, two other entries.
    pub fn process_registry() -> Self {
        let mut fs = Self::new();
        fs.add_pids("/proc", &[1, 42]);
        fs.add_dir("/proc/self");
        fs.add_file("/proc/abc", "");
        fs
    }

    /// 16 GiB total with exactly half of it available.
    pub fn half_used_memory() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16777216 kB
MemFree:         4194304 kB
MemAvailable:    8388608 kB
Buffers:          262144 kB
Cached:          4194304 kB
",
        );
        fs
    }

    /// A pre-3.14 kernel layout without `MemAvailable`.
    pub fn missing_mem_available() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:        8388608 kB
MemFree:         2097152 kB
Buffers:          131072 kB
Cached:          1048576 kB
",
        );
        fs
    }

    /// A `/proc/stat` whose aggregate line was cut short.
    pub fn truncated_stat() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/stat", "cpu  10000 500 3000\n");
        fs
    }
}
