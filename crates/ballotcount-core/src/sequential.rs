//! Single-threaded reference tally.

use tracing::debug;

use crate::options::TallyOptions;
use crate::result::TallyResult;
use crate::scan::scan_into;
use crate::store::BallotStore;
use crate::tally::{Tally, TallyError};

/// Count every ballot on the calling thread, in index order.
#[must_use]
pub fn tally_sequential(store: &BallotStore, opts: &TallyOptions) -> TallyResult {
    let mut result = TallyResult::zeroed(store.candidate_count());
    scan_into(store.ballots(), opts.workload_rounds, &mut result);
    debug!(
        ballots = store.len(),
        null = result.null_votes(),
        "sequential scan complete"
    );
    result
}

/// Sequential strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialTally;

impl SequentialTally {
    /// Create the sequential strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tally for SequentialTally {
    fn tally(&self, store: &BallotStore, opts: &TallyOptions) -> Result<TallyResult, TallyError> {
        Ok(tally_sequential(store, opts))
    }

    fn name(&self) -> &'static str {
        "Sequential"
    }

    fn threads(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> BallotStore {
        let sets: [&[usize]; 5] = [&[0], &[1], &[], &[0, 2], &[1]];
        BallotStore::from_marked_sets(3, &sets).unwrap()
    }

    #[test]
    fn scenario_counts() {
        let result = tally_sequential(&scenario(), &TallyOptions::default());
        assert_eq!(result.counts(), &[1, 2, 0]);
        assert_eq!(result.null_votes(), 2);
    }

    #[test]
    fn empty_store_is_all_zero() {
        let store = BallotStore::blank(0, 4).unwrap();
        let result = tally_sequential(&store, &TallyOptions::default());
        assert_eq!(result, TallyResult::zeroed(4));
    }

    #[test]
    fn conservation() {
        let store = scenario();
        let result = tally_sequential(&store, &TallyOptions::default());
        assert_eq!(result.total(), store.len() as u64);
    }

    #[test]
    fn trait_reports_name_and_threads() {
        let tally = SequentialTally::new();
        assert_eq!(tally.name(), "Sequential");
        assert_eq!(tally.threads(), 1);
        let result = tally.tally(&scenario(), &TallyOptions::default()).unwrap();
        assert_eq!(result.counts(), &[1, 2, 0]);
    }
}
