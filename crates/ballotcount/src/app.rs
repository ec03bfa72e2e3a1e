//! Application entry point and dispatch.

use anyhow::Result;

use ballotcount_baseline::io::{save_report, FileBaseline};
use ballotcount_baseline::record::{ReportKind, RunReport};
use ballotcount_cli::json::JsonPresenter;
use ballotcount_cli::presenter::CLIResultPresenter;
use ballotcount_cli::spinner::GenerationSpinner;
use ballotcount_core::constants::MEDIUM_VOLUME_BALLOTS;
use ballotcount_core::generator::{build_ballot_store, SeedPolicy};
use ballotcount_core::memory_budget::MemoryEstimate;
use ballotcount_core::options::TallyOptions;
use ballotcount_core::registry::DefaultFactory;
use ballotcount_core::store::BallotStore;
use ballotcount_core::tally::TallyError;
use ballotcount_orchestration::interfaces::{
    BaselineProvider, InProcessBaseline, ResultPresenter, TallyRun,
};
use ballotcount_orchestration::metrics::{available_cores, compute_comparison, RunMetrics};
use ballotcount_orchestration::orchestrator::{
    analyze_equivalence, execute_tallies, first_error, sequential_duration,
};
use ballotcount_orchestration::strategy_selection::get_tallies_to_run;

use crate::config::AppConfig;
use crate::version;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        ballotcount_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let cores = available_cores();
    let config = config.clone().with_auto_preset(cores);
    config.validate()?;

    run_cli(&config, cores)
}

fn run_cli(config: &AppConfig, cores: usize) -> Result<()> {
    let threads = config.resolved_threads(cores);

    // Memory budget check
    let limit = config.memory_limit_bytes()?;
    let estimate = MemoryEstimate::estimate(config.ballots, config.candidates, threads);
    if !estimate.fits_in(limit) {
        return Err(TallyError::Allocation(format!(
            "estimated memory ({} KB) exceeds limit ({} KB)",
            estimate.total_bytes / 1024,
            limit.unwrap_or(0) / 1024
        ))
        .into());
    }

    let json = config.json.then(JsonPresenter::new);
    let cli = CLIResultPresenter::new(config.verbose, config.quiet);
    let presenter: &dyn ResultPresenter = match &json {
        Some(json) => json,
        None => &cli,
    };

    if !config.quiet && !config.json {
        print_system_line(config, cores, threads);
    }
    present_advisories(config, cores, threads, presenter);

    let spinner = GenerationSpinner::start(config.ballots, !config.quiet && !config.json);
    let seed = config.seed.map_or(SeedPolicy::Entropy, SeedPolicy::Fixed);
    let store = build_ballot_store(config.ballots, config.candidates, seed);
    spinner.finish();
    let store = store?;

    let factory = DefaultFactory::new();
    let tallies = get_tallies_to_run(&config.strategy, threads, &factory)?;
    let opts = TallyOptions::default().with_workload(config.workload);
    let runs = execute_tallies(&tallies, &store, &opts);

    for run in &runs {
        presenter.present_run(run, &RunMetrics::from_run(run, store.len()));
    }

    if let Err(e) = check_runs(&runs) {
        if let Some(json) = &json {
            json.present_error(&e.to_string());
            println!("{}", json.finish()?);
        }
        return Err(e.into());
    }

    present_comparison(config, &runs, presenter);

    if !config.no_save {
        save_reports(config, &store, &runs);
    }

    if let Some(json) = &json {
        println!("{}", json.finish()?);
    }

    Ok(())
}

/// Fail on the first engine error, then on any disagreement between strategies.
fn check_runs(runs: &[TallyRun]) -> Result<(), TallyError> {
    if let Some(e) = first_error(runs) {
        return Err(e.clone());
    }
    if runs.len() > 1 {
        analyze_equivalence(runs)?;
    }
    Ok(())
}

fn print_system_line(config: &AppConfig, cores: usize, threads: usize) {
    let cpu = cpu_model();
    let cpu = if cpu.is_empty() { "unknown CPU" } else { cpu.as_str() };
    println!("System: {cores} cores ({cpu})");
    println!(
        "Run: {} ballots, {} candidates, strategy {}, {threads} threads",
        config.ballots, config.candidates, config.strategy
    );
    if config.verbose {
        println!("Version: {}", version::full_version());
        match config.seed {
            Some(seed) => println!("Seed: {seed}"),
            None => println!("Seed: entropy"),
        }
        if config.workload > 0 {
            println!("Workload: {} rounds per mark", config.workload);
        }
    }
}

fn cpu_model() -> String {
    use sysinfo::System;
    let sys = System::new_all();
    sys.cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .unwrap_or_default()
}

fn present_advisories(
    config: &AppConfig,
    cores: usize,
    threads: usize,
    presenter: &dyn ResultPresenter,
) {
    if !config.includes_parallel() {
        return;
    }

    if config.ballots < MEDIUM_VOLUME_BALLOTS {
        tracing::info!(ballots = config.ballots, "small volume for a parallel benchmark");
        presenter.present_advisory(&format!(
            "{} ballots is a small volume; parallel overhead may dominate below {MEDIUM_VOLUME_BALLOTS}",
            config.ballots
        ));
    }
    if threads > cores {
        tracing::info!(threads, cores, "more threads than cores");
        presenter.present_advisory(&format!(
            "{threads} threads requested but only {cores} cores detected"
        ));
    }
}

fn present_comparison(config: &AppConfig, runs: &[TallyRun], presenter: &dyn ResultPresenter) {
    let Some(parallel) = runs.iter().find(|r| !r.is_sequential() && r.outcome.is_ok()) else {
        return;
    };

    let provider: Box<dyn BaselineProvider> = match sequential_duration(runs) {
        Some(elapsed) => Box::new(InProcessBaseline(elapsed)),
        None => Box::new(FileBaseline::in_dir(&config.results_dir)),
    };

    match compute_comparison(
        parallel.duration,
        parallel.threads,
        provider.sequential_baseline(),
    ) {
        Some(comparison) => presenter.present_comparison(&comparison),
        None => tracing::info!("no usable sequential baseline, comparison omitted"),
    }
}

fn save_reports(config: &AppConfig, store: &BallotStore, runs: &[TallyRun]) {
    for run in runs {
        let (Some(kind), Ok(result)) = (ReportKind::for_strategy(&run.strategy), &run.outcome)
        else {
            continue;
        };

        let report = RunReport {
            kind,
            ballots: store.len(),
            candidates: store.candidate_count(),
            threads: run.threads,
            result,
            elapsed: run.duration,
        };
        match save_report(&config.results_dir, &report) {
            Ok(path) => tracing::info!(path = %path.display(), "report saved"),
            Err(e) => tracing::warn!(
                dir = %config.results_dir.display(),
                error = %e,
                "could not save run report"
            ),
        }
    }
}
