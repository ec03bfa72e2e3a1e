//! # ballotcount-core
//!
//! Core library for BallotCount. Holds the in-memory ballot store, the random
//! ballot generator, and the two tally strategies: a sequential reference
//! scan and a parallel reduction over statically partitioned chunks.

pub mod constants;
pub mod generator;
pub mod memory_budget;
pub mod options;
pub mod parallel;
pub mod registry;
pub mod result;
pub mod scan;
pub mod sequential;
pub mod store;
pub mod tally;

// Re-exports
pub use constants::{exit_codes, MAX_BALLOTS, MAX_CANDIDATES, MAX_THREADS};
pub use generator::{build_ballot_store, SeedPolicy};
pub use options::TallyOptions;
pub use parallel::{tally_parallel, ParallelTally};
pub use registry::{DefaultFactory, TallyFactory};
pub use result::TallyResult;
pub use sequential::{tally_sequential, SequentialTally};
pub use store::{BallotStore, Mark};
pub use tally::{Tally, TallyError};

/// Tally a store on all available cores with default options.
///
/// This is a convenience function for simple use cases. For explicit thread
/// counts or a simulated workload, use [`tally_parallel`] or the [`Tally`]
/// trait directly.
///
/// # Example
/// ```
/// use ballotcount_core::{tally, BallotStore};
///
/// let sets: [&[usize]; 5] = [&[0], &[1], &[], &[0, 2], &[1]];
/// let store = BallotStore::from_marked_sets(3, &sets).unwrap();
/// let result = tally(&store);
/// assert_eq!(result.counts(), &[1, 2, 0]);
/// assert_eq!(result.null_votes(), 2);
/// ```
#[must_use]
pub fn tally(store: &BallotStore) -> TallyResult {
    let threads = std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
        .min(MAX_THREADS);
    let opts = TallyOptions::default();
    tally_parallel(store, threads, &opts).unwrap_or_else(|_| tally_sequential(store, &opts))
}
