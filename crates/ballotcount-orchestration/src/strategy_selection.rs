//! Strategy selection logic.

use std::sync::Arc;

use ballotcount_core::registry::TallyFactory;
use ballotcount_core::tally::{Tally, TallyError};

/// Get the strategies to run for a `--strategy` selection.
///
/// `"all"` yields every available strategy, sequential first, so that the
/// parallel run can be compared against a baseline from the same process.
pub fn get_tallies_to_run(
    strategy: &str,
    threads: usize,
    factory: &dyn TallyFactory,
) -> Result<Vec<Arc<dyn Tally>>, TallyError> {
    match strategy {
        "all" => factory
            .available()
            .into_iter()
            .map(|name| factory.get(name, threads))
            .collect(),
        name => Ok(vec![factory.get(name, threads)?]),
    }
}
