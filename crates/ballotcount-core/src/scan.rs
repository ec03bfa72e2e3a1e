//! Per-ballot classification shared by every tally strategy.

use std::hint::black_box;

use crate::result::TallyResult;
use crate::store::Mark;

/// How a single ballot counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Exactly one slot marked: a vote for that candidate.
    Valid(usize),
    /// Zero or several slots marked.
    Null,
}

/// Classify one ballot with a single pass over its slots.
///
/// `workload_rounds` toggles the low bit of every marked byte that many
/// times before counting it. The toggled value is discarded, so the
/// classification is identical for any number of rounds.
#[inline]
#[must_use]
pub fn classify(ballot: &[Mark], workload_rounds: u32) -> Classification {
    let mut marked = 0usize;
    let mut last_marked = 0usize;

    for (candidate, &mark) in ballot.iter().enumerate() {
        if mark.is_marked() {
            marked += 1;
            last_marked = candidate;
            if workload_rounds > 0 {
                simulate_work(mark.as_byte(), workload_rounds);
            }
        }
    }

    if marked == 1 {
        Classification::Valid(last_marked)
    } else {
        Classification::Null
    }
}

/// Classify every ballot from `ballots` into `into`.
#[inline]
pub fn scan_into<'a, I>(ballots: I, workload_rounds: u32, into: &mut TallyResult)
where
    I: IntoIterator<Item = &'a [Mark]>,
{
    for ballot in ballots {
        match classify(ballot, workload_rounds) {
            Classification::Valid(candidate) => into.record_vote(candidate),
            Classification::Null => into.record_null(),
        }
    }
}

#[inline(never)]
fn simulate_work(byte: u8, rounds: u32) {
    let mut value = byte;
    for _ in 0..rounds {
        value = black_box(value ^ 0x01);
    }
    black_box(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Mark = Mark::Marked;
    const O: Mark = Mark::Unmarked;

    #[test]
    fn single_mark_is_valid() {
        assert_eq!(classify(&[O, X, O], 0), Classification::Valid(1));
        assert_eq!(classify(&[X], 0), Classification::Valid(0));
        assert_eq!(classify(&[O, O, X], 0), Classification::Valid(2));
    }

    #[test]
    fn blank_ballot_is_null() {
        assert_eq!(classify(&[O, O, O], 0), Classification::Null);
    }

    #[test]
    fn overvote_is_null() {
        assert_eq!(classify(&[X, O, X], 0), Classification::Null);
        assert_eq!(classify(&[X, X, X], 0), Classification::Null);
    }

    #[test]
    fn workload_does_not_change_classification() {
        for rounds in [0, 1, 7, 10, 11] {
            assert_eq!(classify(&[O, X, O], rounds), Classification::Valid(1));
            assert_eq!(classify(&[X, X, O], rounds), Classification::Null);
            assert_eq!(classify(&[O, O, O], rounds), Classification::Null);
        }
    }

    #[test]
    fn scan_into_accumulates() {
        let rows: [&[Mark]; 5] = [&[X, O, O], &[O, X, O], &[O, O, O], &[X, O, X], &[O, X, O]];
        let mut result = TallyResult::zeroed(3);
        scan_into(rows, 0, &mut result);
        assert_eq!(result.counts(), &[1, 2, 0]);
        assert_eq!(result.null_votes(), 2);
    }
}
