//! Tally result: per-candidate valid votes plus the null count.

use serde::{Deserialize, Serialize};

/// Outcome of a tally over one ballot store.
///
/// Invariant for any correct run: `valid_votes() + null_votes() == store.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    counts: Vec<u64>,
    null_votes: u64,
}

impl TallyResult {
    /// An all-zero result for `candidates` slots.
    #[must_use]
    pub fn zeroed(candidates: usize) -> Self {
        Self {
            counts: vec![0; candidates],
            null_votes: 0,
        }
    }

    /// Build a result from explicit totals.
    #[must_use]
    pub fn from_counts(counts: Vec<u64>, null_votes: u64) -> Self {
        Self { counts, null_votes }
    }

    /// Valid votes per candidate, indexed by candidate.
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Valid votes for one candidate.
    ///
    /// # Panics
    ///
    /// Panics if `candidate` is out of range.
    #[must_use]
    pub fn votes_for(&self, candidate: usize) -> u64 {
        self.counts[candidate]
    }

    /// Number of null (blank or overvoted) ballots.
    #[must_use]
    pub fn null_votes(&self) -> u64 {
        self.null_votes
    }

    /// Sum of valid votes over all candidates.
    #[must_use]
    pub fn valid_votes(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Every ballot counted, valid or null.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.valid_votes() + self.null_votes
    }

    /// Number of candidate slots.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.counts.len()
    }

    /// Credit one valid vote to `candidate`.
    #[inline]
    pub(crate) fn record_vote(&mut self, candidate: usize) {
        self.counts[candidate] += 1;
    }

    /// Count one null ballot.
    #[inline]
    pub(crate) fn record_null(&mut self) {
        self.null_votes += 1;
    }

    /// Add another partial result into this one.
    ///
    /// # Panics
    ///
    /// Panics if the candidate counts differ.
    pub fn merge(&mut self, other: &TallyResult) {
        assert_eq!(
            self.counts.len(),
            other.counts.len(),
            "cannot merge tallies of different widths"
        );
        for (total, partial) in self.counts.iter_mut().zip(&other.counts) {
            *total += partial;
        }
        self.null_votes += other.null_votes;
    }
}
