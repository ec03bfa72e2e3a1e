//! JSON result presenter.
//!
//! Collects everything presented during a run and emits a single document.

use parking_lot::Mutex;
use serde::Serialize;

use ballotcount_core::result::TallyResult;
use ballotcount_orchestration::interfaces::{ResultPresenter, TallyRun};
use ballotcount_orchestration::metrics::{Assessment, ComparisonMetrics, RunMetrics};

#[derive(Debug, Clone, Serialize)]
struct JsonRun {
    strategy: String,
    threads: usize,
    ballots: usize,
    elapsed_secs: f64,
    throughput: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<TallyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct JsonComparison {
    #[serde(flatten)]
    metrics: ComparisonMetrics,
    time_saved_secs: f64,
    assessment: Assessment,
}

#[derive(Debug, Default, Serialize)]
struct JsonReport {
    runs: Vec<JsonRun>,
    comparison: Option<JsonComparison>,
    advisories: Vec<String>,
    errors: Vec<String>,
}

/// Presenter that buffers output for one JSON document.
#[derive(Default)]
pub struct JsonPresenter {
    report: Mutex<JsonReport>,
}

impl JsonPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render everything collected so far as pretty-printed JSON.
    pub fn finish(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.report.lock())
    }
}

impl ResultPresenter for JsonPresenter {
    fn present_run(&self, run: &TallyRun, metrics: &RunMetrics) {
        let (result, error) = match &run.outcome {
            Ok(result) => (Some(result.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        self.report.lock().runs.push(JsonRun {
            strategy: run.strategy.clone(),
            threads: metrics.threads,
            ballots: metrics.ballots,
            elapsed_secs: metrics.elapsed.as_secs_f64(),
            throughput: metrics.throughput(),
            result,
            error,
        });
    }

    fn present_comparison(&self, comparison: &ComparisonMetrics) {
        self.report.lock().comparison = Some(JsonComparison {
            metrics: *comparison,
            time_saved_secs: comparison.time_saved_secs(),
            assessment: comparison.assessment(),
        });
    }

    fn present_advisory(&self, message: &str) {
        self.report.lock().advisories.push(message.to_string());
    }

    fn present_error(&self, error: &str) {
        self.report.lock().errors.push(error.to_string());
    }
}
