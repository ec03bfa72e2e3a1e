//! CLI output formatting.

use std::time::Duration;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a ballots-per-second rate with a magnitude suffix.
#[must_use]
pub fn format_rate(per_sec: f64) -> String {
    if per_sec >= 1e9 {
        format!("{:.2}G ballots/s", per_sec / 1e9)
    } else if per_sec >= 1e6 {
        format!("{:.2}M ballots/s", per_sec / 1e6)
    } else if per_sec >= 1e3 {
        format!("{:.2}K ballots/s", per_sec / 1e3)
    } else {
        format!("{per_sec:.0} ballots/s")
    }
}

/// Share of `part` in `whole` as a percentage string (`0.00%` when empty).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_share(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", part as f64 / whole as f64 * 100.0)
}

/// Signed millisecond difference, e.g. `+12.50ms` or `-3.00ms`.
#[must_use]
pub fn format_signed_ms(secs: f64) -> String {
    format!("{:+.2}ms", secs * 1000.0)
}
