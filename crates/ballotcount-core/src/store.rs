//! In-memory ballot store.
//!
//! Ballots are kept row-major in a single flat buffer: ballot `i` occupies
//! `marks[i * width..(i + 1) * width]`. The store is immutable once built and
//! holds no interior mutability, so `&BallotStore` can be read from any number
//! of threads without synchronization.

use std::ops::Range;
use std::slice::ChunksExact;

use crate::tally::TallyError;

/// State of a single candidate slot on a ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Mark {
    /// The slot was left blank.
    #[default]
    Unmarked = b' ',
    /// The slot carries a mark.
    Marked = b'X',
}

impl Mark {
    /// Whether this slot counts as marked.
    #[inline]
    #[must_use]
    pub const fn is_marked(self) -> bool {
        matches!(self, Mark::Marked)
    }

    /// Raw byte representation (`'X'` or `' '`).
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Decode a mark from a byte. `'X'` and `'x'` are marks, anything else is blank.
    #[inline]
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b'X' | b'x' => Mark::Marked,
            _ => Mark::Unmarked,
        }
    }
}

/// Fixed-shape, read-only collection of ballots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallotStore {
    marks: Vec<Mark>,
    candidates: usize,
}

impl BallotStore {
    /// Allocate a store of `ballots` blank ballots.
    ///
    /// Allocation failure is reported as [`TallyError::Allocation`] rather
    /// than aborting the process.
    pub fn blank(ballots: usize, candidates: usize) -> Result<Self, TallyError> {
        check_width(candidates)?;
        let cells = ballots.checked_mul(candidates).ok_or_else(|| {
            TallyError::Allocation(format!("{ballots} x {candidates} marks overflows usize"))
        })?;

        let mut marks = Vec::new();
        marks.try_reserve_exact(cells).map_err(|e| {
            TallyError::Allocation(format!("cannot allocate {ballots} ballots: {e}"))
        })?;
        marks.resize(cells, Mark::Unmarked);

        Ok(Self { marks, candidates })
    }

    /// Build a store from a flat row-major buffer.
    pub fn from_marks(marks: Vec<Mark>, candidates: usize) -> Result<Self, TallyError> {
        check_width(candidates)?;
        if marks.len() % candidates != 0 {
            return Err(TallyError::InvalidInput(format!(
                "{} marks do not divide into rows of {candidates}",
                marks.len()
            )));
        }
        Ok(Self { marks, candidates })
    }

    /// Build a store from explicit rows. Every row must be `candidates` wide.
    pub fn from_rows<I, R>(candidates: usize, rows: I) -> Result<Self, TallyError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Mark]>,
    {
        check_width(candidates)?;
        let mut marks = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            if row.len() != candidates {
                return Err(TallyError::InvalidInput(format!(
                    "ballot {index} has {} slots, expected {candidates}",
                    row.len()
                )));
            }
            marks.extend_from_slice(row);
        }
        Ok(Self { marks, candidates })
    }

    /// Build a store where each ballot is given as the set of marked candidate indices.
    ///
    /// ```
    /// use ballotcount_core::store::BallotStore;
    ///
    /// let sets: [&[usize]; 5] = [&[0], &[1], &[], &[0, 2], &[1]];
    /// let store = BallotStore::from_marked_sets(3, &sets).unwrap();
    /// assert_eq!(store.len(), 5);
    /// assert!(store.mark_at(3, 2).is_marked());
    /// ```
    pub fn from_marked_sets<S>(candidates: usize, sets: &[S]) -> Result<Self, TallyError>
    where
        S: AsRef<[usize]>,
    {
        let mut store = Self::blank(sets.len(), candidates)?;
        for (index, set) in sets.iter().enumerate() {
            let row = store.ballot_mut(index);
            for &candidate in set.as_ref() {
                let slot = row.get_mut(candidate).ok_or_else(|| {
                    TallyError::InvalidInput(format!(
                        "ballot {index} marks candidate {candidate}, only {candidates} exist"
                    ))
                })?;
                *slot = Mark::Marked;
            }
        }
        Ok(store)
    }

    /// Number of ballots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len() / self.candidates
    }

    /// Whether the store holds no ballots.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Width of every ballot.
    #[inline]
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates
    }

    /// Mark state of one slot.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    #[must_use]
    pub fn mark_at(&self, ballot: usize, candidate: usize) -> Mark {
        self.ballot(ballot)[candidate]
    }

    /// The slots of one ballot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[must_use]
    pub fn ballot(&self, index: usize) -> &[Mark] {
        let start = index * self.candidates;
        &self.marks[start..start + self.candidates]
    }

    /// Iterate over all ballots in index order.
    #[must_use]
    pub fn ballots(&self) -> ChunksExact<'_, Mark> {
        self.marks.chunks_exact(self.candidates)
    }

    /// Iterate over the ballots whose indices fall in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past `self.len()`.
    #[must_use]
    pub fn ballots_in(&self, range: Range<usize>) -> ChunksExact<'_, Mark> {
        let start = range.start * self.candidates;
        let end = range.end * self.candidates;
        self.marks[start..end].chunks_exact(self.candidates)
    }

    /// Size of the mark buffer in bytes.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.marks.len() * std::mem::size_of::<Mark>()
    }

    /// Mutable flat buffer, used by the generator before the store is handed out.
    pub(crate) fn marks_mut(&mut self) -> &mut [Mark] {
        &mut self.marks
    }

    fn ballot_mut(&mut self, index: usize) -> &mut [Mark] {
        let start = index * self.candidates;
        &mut self.marks[start..start + self.candidates]
    }
}

fn check_width(candidates: usize) -> Result<(), TallyError> {
    if candidates == 0 {
        return Err(TallyError::InvalidInput(
            "a ballot needs at least one candidate slot".into(),
        ));
    }
    Ok(())
}
