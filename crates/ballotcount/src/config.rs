//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;

use ballotcount_core::constants::{
    DEFAULT_BALLOTS, DEFAULT_CANDIDATES, LARGE_VOLUME_THREAD_CAP, MAX_BALLOTS, MAX_CANDIDATES,
    MAX_THREADS,
};
use ballotcount_core::memory_budget::parse_memory_limit;
use ballotcount_core::tally::TallyError;
use ballotcount_orchestration::metrics::recommended_threads;

const STRATEGIES: [&str; 5] = ["sequential", "seq", "parallel", "par", "all"];

/// BallotCount: sequential versus parallel ballot tally benchmark.
///
/// Generates a random ballot store, tallies it with the selected strategies,
/// and reports speedup and efficiency of the parallel tally.
#[derive(Parser, Debug, Clone)]
#[command(name = "ballotcount", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Number of ballots to generate and count.
    #[arg(short, long, default_value_t = DEFAULT_BALLOTS, env = "BALLOTCOUNT_BALLOTS")]
    pub ballots: usize,

    /// Candidate slots per ballot.
    #[arg(short, long, default_value_t = DEFAULT_CANDIDATES, env = "BALLOTCOUNT_CANDIDATES")]
    pub candidates: usize,

    /// Worker threads for the parallel tally (default: chosen from the ballot volume).
    #[arg(short, long, env = "BALLOTCOUNT_THREADS")]
    pub threads: Option<usize>,

    /// Strategy to run: sequential, parallel, or all.
    #[arg(long, default_value = "all")]
    pub strategy: String,

    /// Seed for reproducible ballot generation (default: OS entropy).
    #[arg(long, env = "BALLOTCOUNT_SEED")]
    pub seed: Option<u64>,

    /// Simulated work rounds per marked slot.
    #[arg(long, default_value_t = 0)]
    pub workload: u32,

    /// Benchmark preset: 1,000,000 ballots, 10 candidates, up to 8 threads.
    #[arg(long)]
    pub auto: bool,

    /// Directory for run reports and the sequential baseline.
    #[arg(long, default_value = ".")]
    pub results_dir: PathBuf,

    /// Do not write run reports.
    #[arg(long)]
    pub no_save: bool,

    /// Emit a single JSON document instead of text.
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (one line per result).
    #[arg(short, long)]
    pub quiet: bool,

    /// Memory limit (e.g., "8G", "512M").
    #[arg(long, default_value = "")]
    pub memory_limit: String,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Apply the `--auto` preset, if requested, for a machine with `cores` cores.
    ///
    /// The preset overrides ballots, candidates, threads, and strategy.
    #[must_use]
    pub fn with_auto_preset(mut self, cores: usize) -> Self {
        if self.auto {
            self.ballots = DEFAULT_BALLOTS;
            self.candidates = MAX_CANDIDATES;
            self.threads = Some(cores.clamp(1, LARGE_VOLUME_THREAD_CAP));
            self.strategy = "all".to_string();
        }
        self
    }

    /// Check every bound before any work starts.
    pub fn validate(&self) -> Result<(), TallyError> {
        if !(1..=MAX_BALLOTS).contains(&self.ballots) {
            return Err(TallyError::Config(format!(
                "ballots must be between 1 and {MAX_BALLOTS}, got {}",
                self.ballots
            )));
        }
        if !(1..=MAX_CANDIDATES).contains(&self.candidates) {
            return Err(TallyError::Config(format!(
                "candidates must be between 1 and {MAX_CANDIDATES}, got {}",
                self.candidates
            )));
        }
        if let Some(threads) = self.threads {
            if !(1..=MAX_THREADS).contains(&threads) {
                return Err(TallyError::Config(format!(
                    "threads must be between 1 and {MAX_THREADS}, got {threads}"
                )));
            }
        }
        if !STRATEGIES.contains(&self.strategy.as_str()) {
            return Err(TallyError::Config(format!(
                "unknown strategy '{}' (expected sequential, parallel, or all)",
                self.strategy
            )));
        }
        self.memory_limit_bytes()?;
        Ok(())
    }

    /// Thread count for the parallel tally.
    #[must_use]
    pub fn resolved_threads(&self, cores: usize) -> usize {
        self.threads
            .unwrap_or_else(|| recommended_threads(self.ballots, cores))
    }

    /// Whether the selected strategy includes a parallel run.
    #[must_use]
    pub fn includes_parallel(&self) -> bool {
        !matches!(self.strategy.as_str(), "sequential" | "seq")
    }

    /// Parsed `--memory-limit`, `None` when unlimited.
    pub fn memory_limit_bytes(&self) -> Result<Option<usize>, TallyError> {
        parse_memory_limit(&self.memory_limit).map_err(TallyError::Config)
    }
}
