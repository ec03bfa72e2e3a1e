//! Core orchestration: timed execution and cross-strategy analysis.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use ballotcount_core::options::TallyOptions;
use ballotcount_core::store::BallotStore;
use ballotcount_core::tally::{Tally, TallyError};

use crate::interfaces::TallyRun;

/// Run one strategy over `store` and time it.
///
/// Only the tally is timed; the store is already built.
pub fn execute_tally(tally: &dyn Tally, store: &BallotStore, opts: &TallyOptions) -> TallyRun {
    let start = Instant::now();
    let outcome = tally.tally(store, opts);
    let duration = start.elapsed();

    match &outcome {
        Ok(result) => info!(
            strategy = tally.name(),
            threads = tally.threads(),
            ballots = store.len(),
            null = result.null_votes(),
            elapsed_ms = duration.as_secs_f64() * 1000.0,
            "tally complete"
        ),
        Err(e) => info!(strategy = tally.name(), error = %e, "tally failed"),
    }

    TallyRun {
        strategy: tally.name().to_string(),
        threads: tally.threads(),
        outcome,
        duration,
    }
}

/// Run every strategy in order over the same store.
///
/// Strategies run one after another, never concurrently, so each timing
/// reflects a separate logical run with the machine to itself.
pub fn execute_tallies(
    tallies: &[Arc<dyn Tally>],
    store: &BallotStore,
    opts: &TallyOptions,
) -> Vec<TallyRun> {
    tallies
        .iter()
        .map(|tally| execute_tally(tally.as_ref(), store, opts))
        .collect()
}

/// Check that every successful run produced the same tally.
pub fn analyze_equivalence(runs: &[TallyRun]) -> Result<(), TallyError> {
    let mut valid = runs.iter().filter_map(|r| r.outcome.as_ref().ok());

    let Some(first) = valid.next() else {
        return Err(TallyError::InvalidInput("no successful tally runs".into()));
    };

    if valid.any(|result| result != first) {
        return Err(TallyError::Mismatch);
    }

    Ok(())
}

/// Duration of the first successful sequential run, if any.
#[must_use]
pub fn sequential_duration(runs: &[TallyRun]) -> Option<Duration> {
    runs.iter()
        .find(|r| r.is_sequential() && r.outcome.is_ok())
        .map(|r| r.duration)
}

/// First error among the runs, if any failed.
#[must_use]
pub fn first_error(runs: &[TallyRun]) -> Option<&TallyError> {
    runs.iter().find_map(|r| r.outcome.as_ref().err())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballotcount_core::parallel::ParallelTally;
    use ballotcount_core::result::TallyResult;
    use ballotcount_core::sequential::SequentialTally;

    fn scenario() -> BallotStore {
        let sets: [&[usize]; 5] = [&[0], &[1], &[], &[0, 2], &[1]];
        BallotStore::from_marked_sets(3, &sets).unwrap()
    }

    fn run(strategy: &str, outcome: Result<TallyResult, TallyError>, ms: u64) -> TallyRun {
        TallyRun {
            strategy: strategy.into(),
            threads: 1,
            outcome,
            duration: Duration::from_millis(ms),
        }
    }

    #[test]
    fn execute_single_strategy() {
        let tally = SequentialTally::new();
        let run = execute_tally(&tally, &scenario(), &TallyOptions::default());
        assert_eq!(run.strategy, "Sequential");
        assert_eq!(run.threads, 1);
        let result = run.outcome.unwrap();
        assert_eq!(result.counts(), &[1, 2, 0]);
        assert_eq!(result.null_votes(), 2);
    }

    #[test]
    fn execute_both_strategies_in_order() {
        let tallies: Vec<Arc<dyn Tally>> = vec![
            Arc::new(SequentialTally::new()),
            Arc::new(ParallelTally::new(3)),
        ];
        let runs = execute_tallies(&tallies, &scenario(), &TallyOptions::default());
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].strategy, "Sequential");
        assert_eq!(runs[1].strategy, "Parallel");
        assert_eq!(runs[1].threads, 3);
        assert!(analyze_equivalence(&runs).is_ok());
    }

    #[test]
    fn execute_reports_engine_error() {
        let tally = ParallelTally::new(0);
        let run = execute_tally(&tally, &scenario(), &TallyOptions::default());
        assert!(matches!(run.outcome, Err(TallyError::InvalidInput(_))));
    }

    #[test]
    fn analyze_matching_results() {
        let runs = vec![
            run("Sequential", Ok(TallyResult::from_counts(vec![1, 2], 0)), 2),
            run("Parallel", Ok(TallyResult::from_counts(vec![1, 2], 0)), 1),
        ];
        assert!(analyze_equivalence(&runs).is_ok());
    }

    #[test]
    fn analyze_mismatching_results() {
        let runs = vec![
            run("Sequential", Ok(TallyResult::from_counts(vec![1, 2], 0)), 2),
            run("Parallel", Ok(TallyResult::from_counts(vec![2, 1], 0)), 1),
        ];
        assert!(matches!(
            analyze_equivalence(&runs),
            Err(TallyError::Mismatch)
        ));
    }

    #[test]
    fn analyze_null_count_mismatch() {
        let runs = vec![
            run("Sequential", Ok(TallyResult::from_counts(vec![1, 2], 0)), 2),
            run("Parallel", Ok(TallyResult::from_counts(vec![1, 2], 1)), 1),
        ];
        assert!(matches!(
            analyze_equivalence(&runs),
            Err(TallyError::Mismatch)
        ));
    }

    #[test]
    fn analyze_ignores_failed_runs() {
        let runs = vec![
            run("Sequential", Ok(TallyResult::from_counts(vec![1], 0)), 2),
            run("Parallel", Err(TallyError::Worker("boom".into())), 1),
        ];
        assert!(analyze_equivalence(&runs).is_ok());
    }

    #[test]
    fn analyze_no_valid_results() {
        let runs = vec![run("Parallel", Err(TallyError::Worker("boom".into())), 1)];
        assert!(matches!(
            analyze_equivalence(&runs),
            Err(TallyError::InvalidInput(_))
        ));
        assert!(matches!(
            analyze_equivalence(&[]),
            Err(TallyError::InvalidInput(_))
        ));
    }

    #[test]
    fn sequential_duration_picks_successful_sequential_run() {
        let runs = vec![
            run("Parallel", Ok(TallyResult::zeroed(1)), 3),
            run("Sequential", Ok(TallyResult::zeroed(1)), 9),
        ];
        assert_eq!(sequential_duration(&runs), Some(Duration::from_millis(9)));

        let runs = vec![run("Parallel", Ok(TallyResult::zeroed(1)), 3)];
        assert!(sequential_duration(&runs).is_none());
    }

    #[test]
    fn first_error_found() {
        let runs = vec![
            run("Sequential", Ok(TallyResult::zeroed(1)), 1),
            run("Parallel", Err(TallyError::Worker("boom".into())), 1),
        ];
        assert!(matches!(first_error(&runs), Some(TallyError::Worker(_))));
        assert!(first_error(&runs[..1]).is_none());
    }
}
