//! Tally options.

/// Options shared by every tally strategy.
#[derive(Debug, Clone, Default)]
pub struct TallyOptions {
    /// Simulated per-mark workload (XOR rounds per marked slot, 0 = off).
    pub workload_rounds: u32,
}

impl TallyOptions {
    /// Set the simulated workload.
    #[must_use]
    pub fn with_workload(mut self, rounds: u32) -> Self {
        self.workload_rounds = rounds;
        self
    }
}
