//! Multi-threaded tally: static partitioning, private accumulators, and a
//! merge under mutual exclusion.
//!
//! Every worker scans one contiguous chunk into its own `TallyResult`. A
//! barrier separates the scan phase from the merge phase, so no worker
//! touches the shared totals until all partitions are counted. Each worker
//! then takes the lock once and folds its partial result in. Integer
//! addition is commutative, so the order in which workers merge does not
//! affect the totals.
//!
//! A worker that panics while scanning still reaches the barrier, so the
//! others are never left waiting; the run then fails with
//! [`TallyError::Worker`] instead of returning partial totals.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Barrier;

use parking_lot::Mutex;
use tracing::debug;

use crate::options::TallyOptions;
use crate::result::TallyResult;
use crate::scan::scan_into;
use crate::store::BallotStore;
use crate::tally::{Tally, TallyError};

/// Split `[0, len)` into `parts` contiguous, near-equal ranges.
///
/// The first `len % parts` ranges hold one extra element. When
/// `parts > len` the trailing ranges are empty.
///
/// ```
/// use ballotcount_core::parallel::partition;
///
/// assert_eq!(partition(10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(partition(2, 3), vec![0..1, 1..2, 2..2]);
/// ```
///
/// # Panics
///
/// Panics if `parts == 0`.
#[must_use]
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    assert!(parts > 0, "cannot partition into zero parts");
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Count `store` with `threads` worker threads.
///
/// The result is identical to [`tally_sequential`](crate::sequential::tally_sequential)
/// for every store and every thread count.
///
/// # Errors
///
/// Returns [`TallyError::InvalidInput`] when `threads == 0` and
/// [`TallyError::Worker`] if a worker thread panics.
pub fn tally_parallel(
    store: &BallotStore,
    threads: usize,
    opts: &TallyOptions,
) -> Result<TallyResult, TallyError> {
    if threads == 0 {
        return Err(TallyError::InvalidInput(
            "parallel tally needs at least one thread".into(),
        ));
    }

    let candidates = store.candidate_count();
    let rounds = opts.workload_rounds;
    let shared = Mutex::new(TallyResult::zeroed(candidates));
    let barrier = Barrier::new(threads);
    let failed = AtomicBool::new(false);

    crossbeam::thread::scope(|scope| {
        for (worker, range) in partition(store.len(), threads).into_iter().enumerate() {
            let shared = &shared;
            let barrier = &barrier;
            let failed = &failed;
            scope.spawn(move |_| {
                let scanned = panic::catch_unwind(AssertUnwindSafe(|| {
                    let mut local = TallyResult::zeroed(candidates);
                    scan_into(store.ballots_in(range.clone()), rounds, &mut local);
                    debug!(
                        worker,
                        start = range.start,
                        end = range.end,
                        "partition scanned"
                    );
                    local
                }));

                // Nobody merges before every partition is counted.
                barrier.wait();

                match scanned {
                    Ok(local) => shared.lock().merge(&local),
                    Err(_) => failed.store(true, Ordering::Relaxed),
                }
            });
        }
    })
    .map_err(|_| TallyError::Worker("a tally worker panicked".into()))?;

    if failed.load(Ordering::Relaxed) {
        return Err(TallyError::Worker("a tally worker panicked".into()));
    }

    let result = shared.into_inner();
    debug!(
        ballots = store.len(),
        threads,
        null = result.null_votes(),
        "parallel tally merged"
    );
    Ok(result)
}

/// Parallel strategy with a fixed worker count.
#[derive(Debug, Clone, Copy)]
pub struct ParallelTally {
    threads: usize,
}

impl ParallelTally {
    /// Create the parallel strategy. `threads` is validated by the caller.
    #[must_use]
    pub fn new(threads: usize) -> Self {
        Self { threads }
    }
}

impl Tally for ParallelTally {
    fn tally(&self, store: &BallotStore, opts: &TallyOptions) -> Result<TallyResult, TallyError> {
        tally_parallel(store, self.threads, opts)
    }

    fn name(&self) -> &'static str {
        "Parallel"
    }

    fn threads(&self) -> usize {
        self.threads
    }
}
