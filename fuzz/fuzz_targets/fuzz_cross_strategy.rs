#![no_main]

use libfuzzer_sys::fuzz_target;

use ballotcount_core::options::TallyOptions;
use ballotcount_core::parallel::tally_parallel;
use ballotcount_core::sequential::tally_sequential;
use ballotcount_core::store::{BallotStore, Mark};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First byte picks the width, second the thread count; the rest are marks.
    let candidates = usize::from(data[0] % 10) + 1;
    let threads = usize::from(data[1] % 32) + 1;
    let body = &data[2..];
    let usable = body.len() - body.len() % candidates;

    let marks: Vec<Mark> = body[..usable]
        .iter()
        .map(|&b| if b & 1 == 1 { Mark::Marked } else { Mark::Unmarked })
        .collect();
    let Ok(store) = BallotStore::from_marks(marks, candidates) else {
        return;
    };

    let opts = TallyOptions::default();
    let seq = tally_sequential(&store, &opts);
    let par = tally_parallel(&store, threads, &opts).expect("parallel tally failed");

    assert_eq!(seq, par, "strategies disagree with {threads} threads");
    assert_eq!(seq.total(), store.len() as u64);
});
