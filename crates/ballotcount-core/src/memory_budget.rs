//! Memory budget estimation and validation.

use crate::store::Mark;

/// Memory estimate for one run.
#[derive(Debug, Clone)]
pub struct MemoryEstimate {
    /// Bytes held by the ballot store.
    pub store_bytes: usize,
    /// Bytes held by per-worker accumulators and the shared result.
    pub accumulator_bytes: usize,
    /// Total estimated memory (in bytes).
    pub total_bytes: usize,
}

impl MemoryEstimate {
    /// Estimate memory for `ballots` ballots of `candidates` slots tallied by `threads` workers.
    #[must_use]
    pub fn estimate(ballots: usize, candidates: usize, threads: usize) -> Self {
        let store_bytes = ballots
            .saturating_mul(candidates)
            .saturating_mul(std::mem::size_of::<Mark>());

        // One private accumulator per worker plus the shared one.
        let per_result = (candidates + 1) * std::mem::size_of::<u64>();
        let accumulator_bytes = per_result.saturating_mul(threads + 1);

        Self {
            store_bytes,
            accumulator_bytes,
            total_bytes: store_bytes.saturating_add(accumulator_bytes),
        }
    }

    /// Check if the run fits within the given memory limit.
    ///
    /// `None` means unlimited (always fits).
    #[must_use]
    pub fn fits_in(&self, limit: Option<usize>) -> bool {
        match limit {
            None => true,
            Some(l) => self.total_bytes <= l,
        }
    }
}

/// Parse a memory limit string (e.g., "8G", "512M", "1024K").
///
/// An empty string means no limit.
///
/// # Errors
///
/// Returns an error string if the format is invalid or the number cannot be parsed.
pub fn parse_memory_limit(s: &str) -> Result<Option<usize>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s, 1)
    };

    let value: usize = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid memory limit: {e}"))?;
    value
        .checked_mul(multiplier)
        .map(Some)
        .ok_or_else(|| format!("memory limit too large: {s}"))
}
