// crates/faceforge-core/src/helpers/format.rs
//
// Shared formatting utilities used by the upload cards, the status bar, and
// the result panel. Canonical home for both helpers so the UI crates never
// grow diverged copies.

/// Format a duration in seconds as zero-padded `MM:SS`.
///
/// Used for the elapsed-generation readout in the status bar.
///
/// ```
/// use faceforge_core::helpers::format::format_clock;
/// assert_eq!(format_clock(0.0),   "00:00");
/// assert_eq!(format_clock(125.4), "02:05");
/// assert_eq!(format_clock(3599.9), "59:59");
/// ```
pub fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a byte count as a compact human-readable size (1024-based, up to
/// two decimals, trailing zeros trimmed).
///
/// ```
/// use faceforge_core::helpers::format::format_size;
/// assert_eq!(format_size(0),         "0 Bytes");
/// assert_eq!(format_size(1_024),     "1 KB");
/// assert_eq!(format_size(1_572_864), "1.5 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let mut number = format!("{value:.2}");
    if number.contains('.') {
        number = number
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
    }
    format!("{number} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_truncates_fractional_seconds() {
        assert_eq!(format_clock(125.4), "02:05");
        assert_eq!(format_clock(59.999), "00:59");
    }

    #[test]
    fn clock_clamps_negative_input() {
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn size_picks_the_right_unit() {
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1_023), "1023 Bytes");
        assert_eq!(format_size(1_536), "1.5 KB");
        assert_eq!(format_size(1_572_864), "1.5 MB");
        assert_eq!(format_size(20 * 1024 * 1024), "20 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn size_keeps_two_significant_decimals() {
        // 1126 / 1024 = 1.0996... → rendered as 1.1 KB
        assert_eq!(format_size(1_126), "1.1 KB");
        // 1100000 / 1048576 = 1.049... → 1.05 MB
        assert_eq!(format_size(1_100_000), "1.05 MB");
    }
}
