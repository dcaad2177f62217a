//! Unit conversion and number formatting shared by the samplers and reporter.

/// kB per GB (1024²), matching the kB units of `/proc/meminfo`.
pub const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Converts kilobytes to gigabytes.
pub fn kb_to_gb(kb: u64) -> f64 {
    kb as f64 / KB_PER_GB
}

/// `100 * part / whole`, or `None` when `whole` is zero.
pub fn percent_of(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(100.0 * part as f64 / whole as f64)
}

/// Two-decimal fixed point, as used on the console and in the log.
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kb_to_gb() {
        assert_eq!(kb_to_gb(16777216), 16.0);
        assert_eq!(kb_to_gb(1048576), 1.0);
        assert_eq!(kb_to_gb(0), 0.0);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(50, 100), Some(50.0));
        assert_eq!(percent_of(0, 100), Some(0.0));
        assert_eq!(percent_of(1, 0), None);
    }

    #[test]
    fn test_format_fixed2() {
        assert_eq!(format_fixed2(50.0), "50.00");
        assert_eq!(format_fixed2(12.3456), "12.35");
        assert_eq!(format_fixed2(99.999), "100.00");
    }
}
