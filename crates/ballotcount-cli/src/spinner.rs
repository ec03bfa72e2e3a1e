//! Spinner shown while a large ballot store is generated.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Stores below this size generate too quickly to need a spinner.
pub const SPINNER_MIN_BALLOTS: usize = 1_000_000;

/// A spinner on stderr; a no-op when disabled.
pub struct GenerationSpinner {
    bar: Option<ProgressBar>,
}

impl GenerationSpinner {
    /// Start a spinner for generating `ballots` ballots.
    ///
    /// Nothing is drawn when `enabled` is false or the store is small.
    #[must_use]
    pub fn start(ballots: usize, enabled: bool) -> Self {
        if !enabled || ballots < SPINNER_MIN_BALLOTS {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
            bar.set_style(style);
        }
        bar.set_message(format!("generating {ballots} ballots"));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// Whether a spinner is being drawn.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Remove the spinner from the terminal.
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
