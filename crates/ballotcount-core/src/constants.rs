//! Constants for run bounds, thread heuristics, and exit codes.

/// Maximum number of ballots accepted for a single run.
pub const MAX_BALLOTS: usize = 10_000_000;

/// Maximum number of candidate slots on a ballot.
pub const MAX_CANDIDATES: usize = 10;

/// Upper bound on the worker count accepted by the parallel tally.
pub const MAX_THREADS: usize = 256;

/// Default number of ballots for a run.
pub const DEFAULT_BALLOTS: usize = 1_000_000;

/// Default number of candidates for a run.
pub const DEFAULT_CANDIDATES: usize = 10;

/// Below this many ballots the thread heuristic recommends at most 2 threads.
pub const SMALL_VOLUME_BALLOTS: usize = 10_000;

/// Below this many ballots the thread heuristic recommends at most 4 threads.
///
/// Parallel runs under this volume also trigger an advisory, since thread
/// start-up tends to dominate the scan.
pub const MEDIUM_VOLUME_BALLOTS: usize = 100_000;

/// Thread cap recommended for large volumes.
pub const LARGE_VOLUME_THREAD_CAP: usize = 8;

/// Number of ballots generated from a single seeded RNG stream.
///
/// Fixed so that a seeded store does not depend on the rayon pool size.
pub const GENERATION_BLOCK_BALLOTS: usize = 65_536;

/// Percentage of generated ballots carrying exactly one mark.
pub const SINGLE_MARK_PERCENT: u32 = 70;

/// Percentage of generated ballots drawing several marks.
pub const MULTI_MARK_PERCENT: u32 = 15;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Sequential and parallel tallies disagreed.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration (bounds violated).
    pub const ERROR_CONFIG: i32 = 4;
    /// Allocation failed or the memory limit was exceeded.
    pub const ERROR_RESOURCE: i32 = 5;
}
