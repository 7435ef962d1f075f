//! `ising-mh`: 2D Ising model Metropolis-Hastings simulation.
//!
//! # Usage
//!
//! ```bash
//! ising-mh <LENGTH> <COUPLING> <TEMPERATURE> <ITERATIONS> <START_SAMPLE> <SAMPLE_INTERVAL> <FILE>
//! ising-mh 32 1.0 2.269 10000000 1000000 1000 data.txt --seed 7
//! ```

mod cli;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising_sim::SimError;
use tracing::{error, info, warn};

use cli::Args;

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level_filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(log_level_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Ctrl+C stops the chain at the next sweep; nothing is appended
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("cannot install Ctrl+C handler")?;

    run(&args, &interrupted)
}

/// Validate, simulate and append one result line for `args`.
///
/// The result file is opened only after both configurations are accepted.
fn run(args: &Args, interrupted: &AtomicBool) -> Result<()> {
    let model = args.model_config();
    let sim = args.sim_config();

    if let Err(e) = model.check() {
        error!("{e}");
        return Err(e.into());
    }
    if let Err(e) = sim.check() {
        error!("{e}");
        return Err(e.into());
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(seed, "starting Metropolis-Hastings run");

    let mut stdout = std::io::stdout().lock();
    output::write_parameters(&mut stdout, &model, &sim, seed)?;

    let mut results_file = output::open_results(&args.output)?;

    let result = if args.no_progress {
        ising_sim::simulate(&model, &sim, seed, interrupted, &|_| {})
    } else {
        let pb = ProgressBar::new(sim.n_iterations);
        pb.set_style(
            ProgressStyle::with_template(
                "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
            )
            .expect("static progress template")
            .progress_chars("=> "),
        );
        pb.set_message("iterations");
        let result = ising_sim::simulate(&model, &sim, seed, interrupted, &|n| pb.inc(n));
        pb.finish_and_clear();
        result
    };
    let result = match result {
        Err(SimError::Interrupted) => {
            warn!("run interrupted, no result appended");
            return Err(SimError::Interrupted.into());
        }
        r => r?,
    };

    output::write_observables(&mut stdout, &model, &result)?;

    let record = ising_sim::ResultRecord::new(&model, &result);
    output::append_record(&mut results_file, &record)?;
    info!(path = %args.output.display(), "result appended");

    Ok(())
}
