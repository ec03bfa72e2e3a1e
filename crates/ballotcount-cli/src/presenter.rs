//! CLI result presenter.

use ballotcount_orchestration::interfaces::{ResultPresenter, TallyRun};
use ballotcount_orchestration::metrics::{Assessment, ComparisonMetrics, RunMetrics};

use crate::output::{format_duration, format_number, format_rate, format_share, format_signed_ms};
use crate::ui;

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

fn assessment_text(assessment: Assessment) -> &'static str {
    match assessment {
        Assessment::Slower => "parallel run was slower; overhead outweighs the gain",
        Assessment::Modest => "modest improvement",
        Assessment::Good => "good parallel speedup",
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_run(&self, run: &TallyRun, metrics: &RunMetrics) {
        let result = match &run.outcome {
            Ok(result) => result,
            Err(e) => {
                self.present_error(&format!("{} tally failed: {e}", run.strategy));
                return;
            }
        };

        if self.quiet {
            let counts: Vec<String> = result.counts().iter().map(u64::to_string).collect();
            println!("{} {} null={}", run.strategy, counts.join(" "), result.null_votes());
            return;
        }

        let total = result.total();
        ui::print_header(&format!("{} tally", run.strategy));
        for (i, &votes) in result.counts().iter().enumerate() {
            println!(
                "  Candidate {:>2}: {:>12} ({})",
                i + 1,
                format_number(votes),
                format_share(votes, total)
            );
        }
        println!("  Valid votes:  {:>12}", format_number(result.valid_votes()));
        println!("  Null votes:   {:>12}", format_number(result.null_votes()));
        println!("  Total:        {:>12}", format_number(total));
        println!(
            "  Elapsed:      {:.6}s ({})",
            metrics.elapsed.as_secs_f64(),
            format_duration(metrics.elapsed)
        );
        if let Some(rate) = metrics.throughput() {
            println!("  Throughput:   {}", format_rate(rate));
        }
        println!("  Threads:      {}", metrics.threads);

        if self.verbose {
            println!(
                "  Ballots:      {} ({} candidates)",
                format_number(metrics.ballots as u64),
                result.candidate_count()
            );
        }
    }

    fn present_comparison(&self, comparison: &ComparisonMetrics) {
        if self.quiet {
            println!(
                "speedup={:.2} efficiency={:.1}%",
                comparison.speedup, comparison.efficiency_percent
            );
            return;
        }

        ui::print_header("Performance comparison");
        println!("  Sequential:   {:.6}s", comparison.sequential_secs);
        println!(
            "  Parallel:     {:.6}s ({} threads)",
            comparison.parallel_secs, comparison.threads
        );
        println!("  Speedup:      {:.2}x", comparison.speedup);
        println!("  Efficiency:   {:.1}%", comparison.efficiency_percent);
        println!(
            "  Time saved:   {}",
            format_signed_ms(comparison.time_saved_secs())
        );

        let hint = assessment_text(comparison.assessment());
        match comparison.assessment() {
            Assessment::Slower => ui::print_warning(hint),
            Assessment::Modest | Assessment::Good => ui::print_success(hint),
        }
    }

    fn present_advisory(&self, message: &str) {
        if !self.quiet {
            ui::print_warning(message);
        }
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}
