//! Report persistence (load/save).

use std::path::{Path, PathBuf};
use std::time::Duration;

use ballotcount_orchestration::interfaces::BaselineProvider;

use crate::record::{parse_elapsed, ReportKind, RunReport};

/// Path of the report for `kind` inside `dir`.
#[must_use]
pub fn report_path(dir: &Path, kind: ReportKind) -> PathBuf {
    dir.join(kind.file_name())
}

/// Write `report` into `dir`, creating the directory if needed.
/// Returns the path written.
pub fn save_report(dir: &Path, report: &RunReport<'_>) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = report_path(dir, report.kind);
    std::fs::write(&path, report.render())?;
    Ok(path)
}

/// Load the elapsed time recorded in a saved report.
///
/// Best-effort: a missing, unreadable, or malformed file yields `None`.
#[must_use]
pub fn load_elapsed(path: &Path) -> Option<Duration> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "no baseline report");
            return None;
        }
    };

    let elapsed = parse_elapsed(&content);
    if elapsed.is_none() {
        tracing::info!(path = %path.display(), "baseline report has no usable elapsed time");
    }
    elapsed
}

/// Baseline read from the sequential report of an earlier run.
#[derive(Debug, Clone)]
pub struct FileBaseline {
    path: PathBuf,
}

impl FileBaseline {
    /// Baseline backed by an explicit report file.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Baseline backed by the sequential report inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(report_path(dir, ReportKind::Sequential))
    }

    /// The report file consulted.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BaselineProvider for FileBaseline {
    fn sequential_baseline(&self) -> Option<Duration> {
        load_elapsed(&self.path)
    }
}
