//! Random ballot generation.
//!
//! The store is filled block by block with rayon. Block `i` draws from its own
//! `StdRng` seeded from the base seed and `i`, so a fixed seed reproduces the
//! same store whatever the size of the rayon pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::constants::{GENERATION_BLOCK_BALLOTS, MULTI_MARK_PERCENT, SINGLE_MARK_PERCENT};
use crate::store::{BallotStore, Mark};
use crate::tally::TallyError;

/// Seed source for ballot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// Reproducible generation from a fixed seed.
    Fixed(u64),
    /// Fresh OS entropy on every build.
    Entropy,
}

impl SeedPolicy {
    /// Resolve to a concrete base seed.
    #[must_use]
    pub fn resolve(self) -> u64 {
        match self {
            SeedPolicy::Fixed(seed) => seed,
            SeedPolicy::Entropy => StdRng::from_entropy().gen(),
        }
    }
}

/// Outcome probabilities for one generated ballot, in percent.
///
/// Ballots that are neither single- nor multi-mark are left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkDistribution {
    /// Chance of exactly one mark.
    pub single_mark_percent: u32,
    /// Chance of drawing 2 to 4 marks (repeated draws may land on one slot).
    pub multi_mark_percent: u32,
}

impl Default for MarkDistribution {
    fn default() -> Self {
        Self {
            single_mark_percent: SINGLE_MARK_PERCENT,
            multi_mark_percent: MULTI_MARK_PERCENT,
        }
    }
}

impl MarkDistribution {
    /// Fill one blank ballot.
    pub fn fill_ballot<R: Rng + ?Sized>(&self, rng: &mut R, ballot: &mut [Mark]) {
        let kind = rng.gen_range(0..100);
        if kind < self.single_mark_percent {
            let candidate = rng.gen_range(0..ballot.len());
            ballot[candidate] = Mark::Marked;
        } else if kind < self.single_mark_percent + self.multi_mark_percent {
            let draws = rng.gen_range(2..=4);
            for _ in 0..draws {
                let candidate = rng.gen_range(0..ballot.len());
                ballot[candidate] = Mark::Marked;
            }
        }
    }
}

/// Build a store of `ballots` ballots with the default distribution.
pub fn build_ballot_store(
    ballots: usize,
    candidates: usize,
    seed: SeedPolicy,
) -> Result<BallotStore, TallyError> {
    build_ballot_store_with(ballots, candidates, seed, &MarkDistribution::default())
}

/// Build a store of `ballots` ballots drawn from `distribution`.
pub fn build_ballot_store_with(
    ballots: usize,
    candidates: usize,
    seed: SeedPolicy,
    distribution: &MarkDistribution,
) -> Result<BallotStore, TallyError> {
    let mut store = BallotStore::blank(ballots, candidates)?;
    let base_seed = seed.resolve();

    store
        .marks_mut()
        .par_chunks_mut(GENERATION_BLOCK_BALLOTS * candidates)
        .enumerate()
        .for_each(|(block, marks)| {
            let mut rng = StdRng::seed_from_u64(block_seed(base_seed, block));
            for ballot in marks.chunks_exact_mut(candidates) {
                distribution.fill_ballot(&mut rng, ballot);
            }
        });

    debug!(ballots, candidates, "ballot store generated");
    Ok(store)
}

fn block_seed(base: u64, block: usize) -> u64 {
    base.wrapping_add((block as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
