//! Golden file integration tests.
//!
//! Reads tests/testdata/tally_golden.json and verifies both strategies, at
//! several thread counts, produce the recorded tallies.

use std::sync::Arc;

use serde::Deserialize;

use ballotcount_core::options::TallyOptions;
use ballotcount_core::parallel::{tally_parallel, ParallelTally};
use ballotcount_core::registry::{DefaultFactory, TallyFactory};
use ballotcount_core::result::TallyResult;
use ballotcount_core::sequential::{tally_sequential, SequentialTally};
use ballotcount_core::store::BallotStore;
use ballotcount_core::tally::Tally;
use ballotcount_orchestration::orchestrator::{analyze_equivalence, execute_tallies};

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    cases: Vec<GoldenCase>,
}

#[derive(Deserialize)]
struct GoldenCase {
    name: String,
    candidates: usize,
    ballots: Vec<Vec<usize>>,
    counts: Vec<u64>,
    null_votes: u64,
}

impl GoldenCase {
    fn store(&self) -> BallotStore {
        BallotStore::from_marked_sets(self.candidates, &self.ballots)
            .unwrap_or_else(|e| panic!("{}: bad golden store: {e}", self.name))
    }

    fn expected(&self) -> TallyResult {
        TallyResult::from_counts(self.counts.clone(), self.null_votes)
    }
}

fn load_golden_data() -> GoldenData {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/tally_golden.json"
    );
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

const THREAD_COUNTS: [usize; 6] = [1, 2, 3, 4, 8, 16];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn golden_file_is_consistent() {
    let data = load_golden_data();
    assert!(!data.cases.is_empty());
    for case in &data.cases {
        assert_eq!(case.counts.len(), case.candidates, "{}", case.name);
        let total: u64 = case.counts.iter().sum::<u64>() + case.null_votes;
        assert_eq!(total, case.ballots.len() as u64, "{}", case.name);
    }
}

#[test]
fn golden_sequential() {
    let opts = TallyOptions::default();
    for case in load_golden_data().cases {
        let result = tally_sequential(&case.store(), &opts);
        assert_eq!(result, case.expected(), "{}", case.name);
    }
}

#[test]
fn golden_parallel_all_thread_counts() {
    let opts = TallyOptions::default();
    for case in load_golden_data().cases {
        let store = case.store();
        for threads in THREAD_COUNTS {
            let result = tally_parallel(&store, threads, &opts).unwrap();
            assert_eq!(result, case.expected(), "{} with {threads} threads", case.name);
        }
    }
}

#[test]
fn golden_with_workload() {
    let opts = TallyOptions::default().with_workload(10);
    for case in load_golden_data().cases {
        let store = case.store();
        assert_eq!(tally_sequential(&store, &opts), case.expected(), "{}", case.name);
        assert_eq!(
            tally_parallel(&store, 4, &opts).unwrap(),
            case.expected(),
            "{}",
            case.name
        );
    }
}

#[test]
fn golden_through_orchestrator() {
    let tallies: Vec<Arc<dyn Tally>> = vec![
        Arc::new(SequentialTally::new()),
        Arc::new(ParallelTally::new(2)),
        Arc::new(ParallelTally::new(5)),
    ];
    for case in load_golden_data().cases {
        let runs = execute_tallies(&tallies, &case.store(), &TallyOptions::default());
        assert!(analyze_equivalence(&runs).is_ok(), "{}", case.name);
        for run in &runs {
            assert_eq!(run.outcome.as_ref().unwrap(), &case.expected(), "{}", case.name);
        }
    }
}

#[test]
fn golden_through_factory() {
    let factory = DefaultFactory::new();
    for case in load_golden_data().cases {
        let store = case.store();
        for name in factory.available() {
            let tally = factory.get(name, 3).unwrap();
            let result = tally.tally(&store, &TallyOptions::default()).unwrap();
            assert_eq!(result, case.expected(), "{} via {name}", case.name);
        }
    }
}
