//! Parsers for `/proc` counter files.
//!
//! These are pure functions over file contents so each format can be tested
//! with plain string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Cumulative tick counters of the aggregate `cpu` line in `/proc/stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
}

impl CpuTicks {
    /// Ticks spent doing nothing, including waiting on I/O.
    pub fn idle_ticks(&self) -> u64 {
        self.idle + self.iowait
    }

    /// Sum of all seven tracked fields.
    pub fn total_ticks(&self) -> u64 {
        self.idle_ticks() + self.user + self.nice + self.system + self.irq + self.softirq
    }
}

/// Parses the aggregate `cpu` line out of `/proc/stat` content.
///
/// Format: `cpu  user nice system idle iowait irq softirq [steal guest guest_nice]`.
/// Trailing fields beyond the first seven are ignored; fewer than seven is an error.
pub fn parse_cpu_ticks(content: &str) -> Result<CpuTicks, ParseError> {
    let line = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ParseError::new("missing aggregate cpu line in stat"))?;

    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(7)
        .map(|s| {
            s.parse()
                .map_err(|_| ParseError::new(format!("invalid cpu tick field '{}'", s)))
        })
        .collect::<Result<_, _>>()?;

    if fields.len() < 7 {
        return Err(ParseError::new(format!(
            "not enough fields in cpu line: expected 7, got {}",
            fields.len()
        )));
    }

    Ok(CpuTicks {
        user: fields[0],
        nice: fields[1],
        system: fields[2],
        idle: fields[3],
        iowait: fields[4],
        irq: fields[5],
        softirq: fields[6],
    })
}

/// The two `/proc/meminfo` fields the memory sampler needs, in kB.
///
/// `None` means the key never appeared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total: Option<u64>,
    pub mem_available: Option<u64>,
}

/// Parses `MemTotal` and `MemAvailable` out of `/proc/meminfo` content.
///
/// The keys may appear in any order. Scanning stops as soon as both have been
/// seen with a non-zero value.
pub fn parse_meminfo(content: &str) -> MemInfo {
    let mut info = MemInfo::default();

    let parse_kb = |rest: &str| -> Option<u64> {
        rest.split_whitespace().next().and_then(|s| s.parse().ok())
    };

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "MemTotal" => info.mem_total = parse_kb(rest),
            "MemAvailable" => info.mem_available = parse_kb(rest),
            _ => continue,
        }

        if info.mem_total.unwrap_or(0) > 0 && info.mem_available.unwrap_or(0) > 0 {
            break;
        }
    }

    info
}

/// Returns true for `/proc` entry names that are process identifiers.
pub fn is_pid_entry(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}
