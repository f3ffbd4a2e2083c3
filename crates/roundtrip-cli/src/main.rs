// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Roundtrip CLI
//!
//! Command-line front end for the exact travelling-salesman solvers.
//! Instances come from a JSON file or from seeded random synthesis; the
//! search runs on a worker thread while the main thread feeds a progress
//! bar from non-blocking snapshots.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use roundtrip_exhaustive::eval::EdgeSumEvaluator;
use roundtrip_exhaustive::solver::ExhaustiveSolver;
use roundtrip_model::index::CityIndex;
use roundtrip_model::matrix::DistanceMatrix;
use roundtrip_model::tour::Tour;
use roundtrip_model::{loading, synth};
use roundtrip_search::monitor::no_op::NoOpMonitor;
use roundtrip_search::progress::ProgressSnapshot;
use roundtrip_search::result::SearchOutcome;
use roundtrip_solver::solver::BranchParallelSolver;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Exact travelling-salesman solver using streaming exhaustive search
#[derive(Parser)]
#[command(name = "roundtrip")]
#[command(about = "Finds the provably shortest closed tour over a complete weighted graph")]
#[command(long_about = "Scores every one of the (n-1)! tours of an instance:
  roundtrip -n 11                  # synthetic 11-city instance, random seed
  roundtrip -n 11 --seed 42        # reproducible synthetic instance
  roundtrip --matrix cities.json   # JSON array-of-arrays distance matrix
  roundtrip -n 12 --parallel       # one worker thread per second-city branch")]
#[command(version)]
struct Cli {
    /// Number of cities for a synthetic instance
    #[arg(short = 'n', long, conflicts_with = "matrix")]
    cities: Option<usize>,

    /// Path to a JSON distance matrix (array of arrays of integers)
    #[arg(short, long)]
    matrix: Option<PathBuf>,

    /// Seed for the synthetic instance; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Smallest synthetic edge weight
    #[arg(long, default_value_t = 1)]
    min_distance: i64,

    /// Largest synthetic edge weight
    #[arg(long, default_value_t = 10)]
    max_distance: i64,

    /// Start city of the tour
    #[arg(short, long, default_value_t = 0)]
    start: usize,

    /// Fan one worker thread out per second-city branch
    #[arg(short, long)]
    parallel: bool,

    /// Write the best tour as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable the live progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// The export record handed to downstream visualization tooling.
#[derive(Serialize)]
struct TourExport {
    cost: i64,
    cycle: Vec<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let matrix = load_or_synthesize(&cli)?;
    let total = matrix
        .num_tours()
        .context("the tour count of this instance exceeds u64; reduce the instance size")?;
    info!(
        "{} cities, {} tours to score from city {}",
        matrix.num_cities(),
        total,
        cli.start
    );

    let start = CityIndex::new(cli.start);
    let show_bar = !cli.no_progress;
    let outcome = if cli.parallel {
        run_parallel(&matrix, start, show_bar)?
    } else {
        run_sequential(&matrix, start, show_bar)?
    };

    report(&outcome);

    if let Some(path) = &cli.output {
        let tour = outcome
            .best_tour()
            .context("no tour available for export")?;
        export_tour(path, tour)?;
        info!("best tour written to {}", path.display());
    }

    Ok(())
}

fn load_or_synthesize(cli: &Cli) -> Result<DistanceMatrix<i64>> {
    match (&cli.matrix, cli.cities) {
        (Some(path), _) => {
            let matrix = loading::from_json_file::<i64, _>(path)
                .with_context(|| format!("failed to load instance from {}", path.display()))?;
            info!(
                "{} x {} instance loaded from {}",
                matrix.num_cities(),
                matrix.num_cities(),
                path.display()
            );
            Ok(matrix)
        }
        (None, Some(num_cities)) => {
            let seed = cli.seed.unwrap_or_else(rand::random);
            info!(
                "synthesizing {} x {} instance with seed {}",
                num_cities, num_cities, seed
            );
            Ok(synth::random_matrix(
                num_cities,
                seed,
                cli.min_distance,
                cli.max_distance,
            )?)
        }
        (None, None) => bail!("provide either --cities N or --matrix FILE"),
    }
}

fn run_sequential(
    matrix: &DistanceMatrix<i64>,
    start: CityIndex,
    show_bar: bool,
) -> Result<SearchOutcome<i64>> {
    let mut solver = ExhaustiveSolver::preallocated(matrix.num_cities());
    let handle = solver.progress();
    let evaluator = EdgeSumEvaluator::new();

    let outcome = std::thread::scope(|scope| {
        let worker = scope.spawn(|| solver.solve(matrix, start, &evaluator, NoOpMonitor::new()));
        let bar = show_bar.then(|| drive_bar(|| handle.snapshot(), || worker.is_finished()));
        let outcome = worker.join().expect("search thread panicked");
        if let Some(bar) = bar {
            finish_bar(&bar, &handle.snapshot());
        }
        outcome
    })?;
    Ok(outcome)
}

fn run_parallel(
    matrix: &DistanceMatrix<i64>,
    start: CityIndex,
    show_bar: bool,
) -> Result<SearchOutcome<i64>> {
    let solver = BranchParallelSolver::new();
    let handle = solver.progress();
    let evaluator = EdgeSumEvaluator::new();

    let outcome = std::thread::scope(|scope| {
        let worker = scope.spawn(|| solver.solve(matrix, start, &evaluator));
        let bar = show_bar.then(|| drive_bar(|| handle.snapshot(), || worker.is_finished()));
        let outcome = worker.join().expect("search thread panicked");
        if let Some(bar) = bar {
            finish_bar(&bar, &handle.snapshot());
        }
        outcome
    })?;
    Ok(outcome)
}

/// Creates the progress bar and feeds it snapshots until the search
/// worker signals completion. Returns the bar for the final update.
fn drive_bar<S, F>(snapshot: S, finished: F) -> ProgressBar
where
    S: Fn() -> ProgressSnapshot,
    F: Fn() -> bool,
{
    let first = snapshot();
    let bar = ProgressBar::new(first.total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .expect("progress template is valid")
            .progress_chars("#>-"),
    );

    while !finished() {
        update_bar(&bar, &snapshot());
        std::thread::sleep(Duration::from_millis(100));
    }
    bar
}

fn update_bar(bar: &ProgressBar, snapshot: &ProgressSnapshot) {
    // The total is published by the run itself; pick it up as soon as it
    // appears in case the bar was created before the worker started.
    if bar.length() != Some(snapshot.total) {
        bar.set_length(snapshot.total);
    }
    bar.set_position(snapshot.completed);
    let best = match snapshot.best_cost {
        Some(cost) => cost.to_string(),
        None => "-".to_string(),
    };
    bar.set_message(format!(
        "{:.0} tours/s, best {}",
        snapshot.tours_per_second, best
    ));
}

fn finish_bar(bar: &ProgressBar, snapshot: &ProgressSnapshot) {
    update_bar(bar, snapshot);
    bar.finish();
}

fn report(outcome: &SearchOutcome<i64>) {
    match outcome.best_tour() {
        Some(tour) => println!("{}", tour),
        None => println!("no tour found"),
    }
    println!("termination: {}", outcome.reason);
    print!("{}", outcome.statistics);
}

fn export_tour(path: &Path, tour: &Tour<i64>) -> Result<()> {
    let export = TourExport {
        cost: tour.cost(),
        cycle: tour.cycle().iter().map(CityIndex::get).collect(),
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)?;
    Ok(())
}
