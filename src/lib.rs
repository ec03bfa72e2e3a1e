//! Workspace-level integration test package for BallotCount.
//!
//! The tests live under `tests/`; this library is intentionally empty.
