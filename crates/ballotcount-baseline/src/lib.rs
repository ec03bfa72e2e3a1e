//! # ballotcount-baseline
//!
//! Labeled run reports and a best-effort reader of the elapsed time a
//! previous sequential run recorded.

pub mod io;
pub mod record;

pub use io::{load_elapsed, report_path, save_report, FileBaseline};
pub use record::{parse_elapsed, ReportKind, RunReport};
