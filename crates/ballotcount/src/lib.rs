//! BallotCount library: application logic for the ballot tally benchmark.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
