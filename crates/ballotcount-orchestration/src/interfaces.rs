//! Orchestration interfaces.

use std::time::Duration;

use ballotcount_core::result::TallyResult;
use ballotcount_core::tally::TallyError;

use crate::metrics::{ComparisonMetrics, RunMetrics};

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present one completed run.
    fn present_run(&self, run: &TallyRun, metrics: &RunMetrics);

    /// Present the sequential/parallel comparison.
    fn present_comparison(&self, comparison: &ComparisonMetrics);

    /// Present a non-fatal advisory.
    fn present_advisory(&self, message: &str);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Source of a sequential elapsed time recorded by an earlier run.
///
/// Reading is best-effort: any failure yields `None` and the comparison is
/// simply omitted.
pub trait BaselineProvider {
    /// Elapsed time of the reference sequential run, if one is available.
    fn sequential_baseline(&self) -> Option<Duration>;
}

/// Baseline provider that never has a baseline.
pub struct NoBaseline;

impl BaselineProvider for NoBaseline {
    fn sequential_baseline(&self) -> Option<Duration> {
        None
    }
}

/// Baseline taken from a run made in the same process.
pub struct InProcessBaseline(pub Duration);

impl BaselineProvider for InProcessBaseline {
    fn sequential_baseline(&self) -> Option<Duration> {
        Some(self.0)
    }
}

/// Result of a single timed tally.
#[derive(Debug, Clone)]
pub struct TallyRun {
    /// Strategy name.
    pub strategy: String,
    /// Worker threads used.
    pub threads: usize,
    /// The computed tally or a structured error.
    pub outcome: Result<TallyResult, TallyError>,
    /// Wall-clock duration of the tally alone (generation excluded).
    pub duration: Duration,
}

impl TallyRun {
    /// Whether this run used the sequential strategy.
    #[must_use]
    pub fn is_sequential(&self) -> bool {
        self.strategy == "Sequential"
    }
}
