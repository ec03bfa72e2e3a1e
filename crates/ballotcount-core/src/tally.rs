//! Tally trait and error type.
//!
//! `Tally` is the public trait consumed by orchestration. It is implemented by
//! `SequentialTally` and `ParallelTally`, which must agree on every store.

use crate::options::TallyOptions;
use crate::result::TallyResult;
use crate::store::BallotStore;

/// Error type for ballot stores and tallies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    /// Input violated a precondition (shape, thread count).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration outside the accepted bounds.
    #[error("configuration error: {0}")]
    Config(String),

    /// Memory could not be reserved for the run.
    #[error("resource exhausted: {0}")]
    Allocation(String),

    /// A worker thread failed during the parallel scan.
    #[error("worker failure: {0}")]
    Worker(String),

    /// Strategies produced different tallies for the same store.
    #[error("tally mismatch between strategies")]
    Mismatch,
}

/// A counting strategy.
pub trait Tally: Send + Sync {
    /// Count `store`, producing per-candidate and null totals.
    fn tally(&self, store: &BallotStore, opts: &TallyOptions) -> Result<TallyResult, TallyError>;

    /// Name of this strategy.
    fn name(&self) -> &'static str;

    /// Number of worker threads this strategy uses.
    fn threads(&self) -> usize;
}
