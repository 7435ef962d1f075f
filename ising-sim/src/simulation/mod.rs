pub mod chain;

pub use chain::Chain;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::debug;

use crate::config::{ModelConfig, SimConfig};
use crate::error::{SimError, SimResult};
use crate::geometry::Lattice;
use crate::statistics::{ChainResult, Observables, Statistics};

/// Run the Metropolis-Hastings loop for one [`Chain`].
///
/// Each iteration performs one single-spin-flip proposal and updates the
/// chain's running energy and magnetization from the step deltas. Iteration
/// `i` is sampled when [`SimConfig::is_sample`] holds, accumulating `E`, `E²`,
/// `M` and `M²`; the observables are derived from those sums at the end.
///
/// `config` must yield at least one sample ([`SimConfig::check`] is run on
/// entry). `interrupted` is polled once per sweep of `n_spins` iterations.
/// `on_sweep` receives the number of iterations completed since its previous
/// call: `n_spins` after every full sweep, then the remainder of a trailing
/// partial sweep, so the reported counts always sum to `n_iterations`.
pub fn run_chain(
    lattice: &Lattice,
    chain: &mut Chain,
    config: &SimConfig,
    interrupted: &AtomicBool,
    on_sweep: &dyn Fn(u64),
) -> SimResult<ChainResult> {
    config.check()?;

    let n_spins = lattice.n_spins;
    let mut energy_stat = Statistics::new();
    let mut mag_stat = Statistics::new();

    debug!(
        n_spins,
        n_iterations = config.n_iterations,
        expected_samples = config.expected_samples(),
        "chain start"
    );

    let sweep_len = n_spins as u64;
    let mut reported = 0u64;

    let start = Instant::now();
    for i in 0..config.n_iterations {
        if i % sweep_len == 0 {
            if interrupted.load(Ordering::Relaxed) {
                return Err(SimError::Interrupted);
            }
            if i > 0 {
                on_sweep(sweep_len);
                reported += sweep_len;
            }
        }

        chain.step(lattice);

        if config.is_sample(i) {
            energy_stat.update(chain.energy);
            mag_stat.update(chain.magnetization as f64);
        }
    }
    if reported < config.n_iterations {
        on_sweep(config.n_iterations - reported);
    }
    let elapsed = start.elapsed();

    let observables =
        Observables::from_moments(&energy_stat, &mag_stat, n_spins, chain.temperature)
            .ok_or(SimError::NoSamples)?;

    debug!(
        n_samples = energy_stat.count,
        elapsed_secs = elapsed.as_secs_f64(),
        "chain finished"
    );

    Ok(ChainResult {
        observables,
        n_samples: energy_stat.count,
        elapsed,
    })
}

/// Build the lattice and a hot-started chain for `model`, then run it.
pub fn simulate(
    model: &ModelConfig,
    config: &SimConfig,
    seed: u64,
    interrupted: &AtomicBool,
    on_sweep: &dyn Fn(u64),
) -> SimResult<ChainResult> {
    model.check()?;
    let lattice = Lattice::new(model.length);
    let mut chain = Chain::new(&lattice, model, seed)?;
    run_chain(&lattice, &mut chain, config, interrupted, on_sweep)
}
