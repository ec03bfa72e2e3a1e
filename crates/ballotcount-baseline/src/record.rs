//! Run report rendering and parsing.

use std::fmt::Write as _;
use std::time::Duration;

use ballotcount_core::result::TallyResult;

/// Label of the line a later run parses back as its baseline.
pub const ELAPSED_LABEL: &str = "Elapsed time:";

const ELAPSED_UNIT: &str = "seconds";

/// Which strategy produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Single-threaded run.
    Sequential,
    /// Multi-threaded run.
    Parallel,
}

impl ReportKind {
    /// Report kind for a strategy name, if it is one of the known strategies.
    #[must_use]
    pub fn for_strategy(name: &str) -> Option<Self> {
        match name {
            "Sequential" => Some(Self::Sequential),
            "Parallel" => Some(Self::Parallel),
            _ => None,
        }
    }

    /// File name the report is saved under.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Sequential => "results_sequential.txt",
            Self::Parallel => "results_parallel.txt",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Sequential => "SEQUENTIAL",
            Self::Parallel => "PARALLEL",
        }
    }
}

/// Everything a saved report records about one run.
#[derive(Debug, Clone)]
pub struct RunReport<'a> {
    /// Strategy that produced the tally.
    pub kind: ReportKind,
    /// Ballots counted.
    pub ballots: usize,
    /// Candidate slots per ballot.
    pub candidates: usize,
    /// Worker threads.
    pub threads: usize,
    /// The tally.
    pub result: &'a TallyResult,
    /// Duration of the tally.
    pub elapsed: Duration,
}

impl RunReport<'_> {
    /// Render the report as labeled text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let title = format!("BALLOT TALLY RESULTS ({})", self.kind.title());
        let rule = "=".repeat(title.len());
        let secs = self.elapsed.as_secs_f64();
        let total = self.result.total();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Ballots: {}", self.ballots);
        let _ = writeln!(out, "Candidates: {}", self.candidates);
        let _ = writeln!(out, "Threads: {}", self.threads);
        let _ = writeln!(out);

        for (i, &votes) in self.result.counts().iter().enumerate() {
            let share = if total > 0 {
                votes as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let _ = writeln!(out, "Candidate {}: {votes} votes ({share:.2}%)", i + 1);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Valid votes: {}", self.result.valid_votes());
        let _ = writeln!(out, "Null votes: {}", self.result.null_votes());
        let _ = writeln!(out, "Total ballots: {total}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{ELAPSED_LABEL} {secs:.6} {ELAPSED_UNIT}");
        let _ = writeln!(out, "Elapsed (ms): {:.3}", secs * 1000.0);
        if secs > 0.0 {
            let _ = writeln!(
                out,
                "Throughput: {:.0} ballots/second",
                self.ballots as f64 / secs
            );
        }
        out
    }
}

/// Read the elapsed time back out of rendered report text.
///
/// Returns `None` when the line is missing or the value is not a positive,
/// finite number of seconds.
///
/// ```
/// use ballotcount_baseline::record::parse_elapsed;
///
/// let text = "Ballots: 10\nElapsed time: 0.250000 seconds\n";
/// assert_eq!(parse_elapsed(text).unwrap().as_millis(), 250);
/// assert!(parse_elapsed("Elapsed time: 0.000000 seconds").is_none());
/// ```
#[must_use]
pub fn parse_elapsed(text: &str) -> Option<Duration> {
    let value = text.lines().find_map(|line| {
        line.trim()
            .strip_prefix(ELAPSED_LABEL)?
            .trim()
            .strip_suffix(ELAPSED_UNIT)
            .map(str::trim)
    })?;

    let secs: f64 = value.parse().ok()?;
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> TallyResult {
        TallyResult::from_counts(vec![1, 2, 0], 2)
    }

    fn report(result: &TallyResult, elapsed: Duration) -> RunReport<'_> {
        RunReport {
            kind: ReportKind::Parallel,
            ballots: 5,
            candidates: 3,
            threads: 2,
            result,
            elapsed,
        }
    }

    #[test]
    fn render_contains_counts_and_summary() {
        let result = result();
        let text = report(&result, Duration::from_millis(1500)).render();
        assert!(text.starts_with("BALLOT TALLY RESULTS (PARALLEL)"));
        assert!(text.contains("Threads: 2"));
        assert!(text.contains("Candidate 1: 1 votes (20.00%)"));
        assert!(text.contains("Candidate 2: 2 votes (40.00%)"));
        assert!(text.contains("Candidate 3: 0 votes (0.00%)"));
        assert!(text.contains("Valid votes: 3"));
        assert!(text.contains("Null votes: 2"));
        assert!(text.contains("Total ballots: 5"));
        assert!(text.contains("Elapsed time: 1.500000 seconds"));
        assert!(text.contains("Elapsed (ms): 1500.000"));
    }

    #[test]
    fn rendered_elapsed_parses_back() {
        let result = result();
        let text = report(&result, Duration::from_micros(123_456)).render();
        let parsed = parse_elapsed(&text).unwrap();
        assert!((parsed.as_secs_f64() - 0.123_456).abs() < 1e-9);
    }

    #[test]
    fn zero_elapsed_omits_throughput() {
        let result = result();
        let text = report(&result, Duration::ZERO).render();
        assert!(!text.contains("Throughput"));
        assert!(parse_elapsed(&text).is_none());
    }

    #[test]
    fn empty_result_renders_zero_shares() {
        let result = TallyResult::zeroed(2);
        let text = report(&result, Duration::from_millis(1)).render();
        assert!(text.contains("Candidate 1: 0 votes (0.00%)"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_elapsed("").is_none());
        assert!(parse_elapsed("Elapsed time: abc seconds").is_none());
        assert!(parse_elapsed("Elapsed time: -1.0 seconds").is_none());
        assert!(parse_elapsed("Elapsed time: NaN seconds").is_none());
        assert!(parse_elapsed("Elapsed time: inf seconds").is_none());
        assert!(parse_elapsed("Elapsed time: 1.0").is_none());
    }

    #[test]
    fn parse_ignores_millisecond_line() {
        let text = "Elapsed (ms): 12.000\nElapsed time: 0.012000 seconds\n";
        let parsed = parse_elapsed(text).unwrap();
        assert!((parsed.as_secs_f64() - 0.012).abs() < 1e-9);
    }

    #[test]
    fn kind_lookup() {
        assert_eq!(
            ReportKind::for_strategy("Sequential"),
            Some(ReportKind::Sequential)
        );
        assert_eq!(ReportKind::for_strategy("Parallel"), Some(ReportKind::Parallel));
        assert!(ReportKind::for_strategy("other").is_none());
        assert_eq!(ReportKind::Sequential.file_name(), "results_sequential.txt");
    }
}
