use std::sync::atomic::AtomicBool;
use std::time::Instant;

use ising_sim::{run_chain, Chain, Lattice, ModelConfig, SimConfig};

const L: usize = 128;
const N_TEMPS: usize = 8;
const SWEEPS: u64 = 200;

fn main() {
    let lattice = Lattice::new(L);
    let n_spins = lattice.n_spins as u64;

    let temps: Vec<f64> = (0..N_TEMPS)
        .map(|i| 1.5 + 2.0 * i as f64 / (N_TEMPS - 1) as f64)
        .collect();

    let config = SimConfig {
        n_iterations: SWEEPS * n_spins,
        start_sample: SWEEPS * n_spins / 4,
        sample_interval: n_spins,
    };

    println!(
        "Lattice: {}x{}  |  Temps: {}  |  Sweeps: {}  |  Flips/run: {}",
        L, L, N_TEMPS, SWEEPS, config.n_iterations
    );
    println!("{}", "-".repeat(70));

    let model = ModelConfig {
        length: L,
        coupling: 1.0,
        temperature: temps[0],
    };
    let mut chain = Chain::new(&lattice, &model, 42).unwrap();

    let interrupted = AtomicBool::new(false);
    let t0 = Instant::now();
    for (i, &temperature) in temps.iter().enumerate() {
        // One allocation for all runs; each temperature gets a fresh hot start
        chain.temperature = temperature;
        chain.reset(&lattice, 42 + i as u64);
        let result = run_chain(&lattice, &mut chain, &config, &interrupted, &|_| {}).unwrap();
        let secs = result.elapsed.as_secs_f64();
        println!(
            "T = {:.3}  e = {:+.5}  |m| = {:.5}  {:.1} Mflips/s",
            temperature,
            result.observables.energy_per_spin,
            result.observables.magnetization_per_spin.abs(),
            config.n_iterations as f64 / secs / 1e6
        );
    }
    let elapsed = t0.elapsed().as_secs_f64();

    println!("Total: {:.3} s", elapsed);
}
