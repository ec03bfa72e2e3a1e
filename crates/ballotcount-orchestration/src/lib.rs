//! # ballotcount-orchestration
//!
//! Timed execution, strategy selection, equivalence checks, and speedup
//! metrics.

pub mod interfaces;
pub mod metrics;
pub mod orchestrator;
pub mod strategy_selection;

pub use interfaces::{BaselineProvider, ResultPresenter, TallyRun};
pub use metrics::{compute_comparison, Assessment, ComparisonMetrics, RunMetrics};
pub use orchestrator::{analyze_equivalence, execute_tallies, execute_tally};
