//! A worker that panics mid-scan must fail the tally, not hang it.
//!
//! The failure is injected through a global tracing subscriber that panics on
//! worker 0's "partition scanned" event. The subscriber is process-wide, so
//! this file holds a single test.

use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Metadata, Subscriber};

use ballotcount_core::options::TallyOptions;
use ballotcount_core::parallel::tally_parallel;
use ballotcount_core::store::BallotStore;
use ballotcount_core::tally::TallyError;

/// Panics whenever an event carries `worker = 0`.
struct FailFirstWorker;

#[derive(Default)]
struct WorkerField(Option<u64>);

impl Visit for WorkerField {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "worker" {
            self.0 = Some(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

impl Subscriber for FailFirstWorker {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut worker = WorkerField::default();
        event.record(&mut worker);
        if worker.0 == Some(0) {
            panic!("injected failure in worker 0");
        }
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

#[test]
fn panicking_worker_returns_worker_error() {
    tracing::subscriber::set_global_default(FailFirstWorker).unwrap();

    let sets: [&[usize]; 5] = [&[0], &[1], &[], &[0, 2], &[1]];
    let store = BallotStore::from_marked_sets(3, &sets).unwrap();

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(tally_parallel(&store, 4, &TallyOptions::default()));
    });

    let outcome = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("parallel tally did not return after a worker panicked");
    assert!(
        matches!(outcome, Err(TallyError::Worker(_))),
        "expected a worker error, got {outcome:?}"
    );
}
