//! Version information.

/// Get the version string.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get the full version string.
#[must_use]
pub fn full_version() -> String {
    format!("ballotcount {}", version())
}
