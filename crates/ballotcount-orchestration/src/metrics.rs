//! Run metrics, speedup/efficiency comparison, and the thread heuristic.

use std::time::Duration;

use serde::Serialize;

use ballotcount_core::constants::{
    LARGE_VOLUME_THREAD_CAP, MEDIUM_VOLUME_BALLOTS, SMALL_VOLUME_BALLOTS,
};

use crate::interfaces::TallyRun;

/// Timing of one tally invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunMetrics {
    /// Ballots counted.
    pub ballots: usize,
    /// Worker threads used.
    pub threads: usize,
    /// Wall-clock duration of the tally.
    pub elapsed: Duration,
}

impl RunMetrics {
    /// Metrics for a run over `ballots` ballots.
    #[must_use]
    pub fn from_run(run: &TallyRun, ballots: usize) -> Self {
        Self {
            ballots,
            threads: run.threads,
            elapsed: run.duration,
        }
    }

    /// Ballots per second, or `None` when no measurable time elapsed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            Some(self.ballots as f64 / secs)
        } else {
            None
        }
    }
}

/// Advisory reading of a speedup figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    /// The parallel run was slower than the baseline.
    Slower,
    /// Break-even up to, but not including, 1.5x.
    Modest,
    /// At least 1.5x.
    Good,
}

/// Parallel run measured against a sequential baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    /// Baseline sequential time, seconds.
    pub sequential_secs: f64,
    /// Parallel time, seconds.
    pub parallel_secs: f64,
    /// Worker threads of the parallel run.
    pub threads: usize,
    /// `sequential / parallel`.
    pub speedup: f64,
    /// `speedup / threads * 100`.
    pub efficiency_percent: f64,
}

impl ComparisonMetrics {
    /// Seconds saved by the parallel run (negative when it was slower).
    #[must_use]
    pub fn time_saved_secs(&self) -> f64 {
        self.sequential_secs - self.parallel_secs
    }

    /// Advisory reading of the speedup.
    #[must_use]
    pub fn assessment(&self) -> Assessment {
        if self.speedup < 1.0 {
            Assessment::Slower
        } else if self.speedup < 1.5 {
            Assessment::Modest
        } else {
            Assessment::Good
        }
    }
}

/// Compare a parallel run against an optional sequential baseline.
///
/// Returns `None` when there is no baseline, or when either time is not a
/// positive measurement.
///
/// ```
/// use std::time::Duration;
/// use ballotcount_orchestration::metrics::compute_comparison;
///
/// let cmp = compute_comparison(
///     Duration::from_millis(250),
///     4,
///     Some(Duration::from_secs(1)),
/// )
/// .unwrap();
/// assert!((cmp.speedup - 4.0).abs() < 1e-9);
/// assert!((cmp.efficiency_percent - 100.0).abs() < 1e-9);
///
/// assert!(compute_comparison(Duration::from_millis(250), 4, None).is_none());
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_comparison(
    parallel: Duration,
    threads: usize,
    baseline: Option<Duration>,
) -> Option<ComparisonMetrics> {
    let sequential_secs = baseline?.as_secs_f64();
    let parallel_secs = parallel.as_secs_f64();
    if sequential_secs <= 0.0 || parallel_secs <= 0.0 || threads == 0 {
        return None;
    }

    let speedup = sequential_secs / parallel_secs;
    Some(ComparisonMetrics {
        sequential_secs,
        parallel_secs,
        threads,
        speedup,
        efficiency_percent: speedup / threads as f64 * 100.0,
    })
}

/// Recommended worker count for a volume of ballots on `cores` cores.
///
/// Small volumes get few threads since start-up cost dominates; large ones
/// are capped at 8 or the core count, whichever is lower.
#[must_use]
pub fn recommended_threads(ballots: usize, cores: usize) -> usize {
    let cap = if ballots < SMALL_VOLUME_BALLOTS {
        2
    } else if ballots < MEDIUM_VOLUME_BALLOTS {
        4
    } else {
        LARGE_VOLUME_THREAD_CAP
    };
    cap.min(cores).max(1)
}

/// Detected hardware parallelism (falls back to 1).
#[must_use]
pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}
