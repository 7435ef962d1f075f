use crate::config::ModelConfig;
use crate::error::SimResult;
use crate::geometry::Lattice;
use crate::mcmc::{metropolis_step, StepOutcome};
use crate::spins::{self, energy};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Mutable state of one Markov chain.
///
/// Holds the spin configuration, the chain's PRNG and the running total
/// energy and magnetization. The totals are only ever updated through step
/// deltas; [`Chain::recompute`] gives the from-scratch values to check them
/// against.
pub struct Chain {
    pub coupling: f64,
    pub temperature: f64,
    /// Spin configuration, length `n_spins` (+1/−1).
    pub spins: Vec<i8>,
    pub rng: Xoshiro256StarStar,
    /// Current total energy.
    pub energy: f64,
    /// Current total magnetization.
    pub magnetization: i64,
}

impl Chain {
    /// Hot-start a chain for `model` on `lattice`, seeding its PRNG with `seed`.
    pub fn new(lattice: &Lattice, model: &ModelConfig, seed: u64) -> SimResult<Self> {
        model.check()?;
        debug_assert_eq!(lattice.length, model.length);

        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let spins = spins::random_spins(lattice.n_spins, &mut rng);
        let energy = energy::total_energy(lattice, &spins, model.coupling);
        let magnetization = energy::total_magnetization(&spins);

        Ok(Self {
            coupling: model.coupling,
            temperature: model.temperature,
            spins,
            rng,
            energy,
            magnetization,
        })
    }

    /// Re-randomize the spins from a fresh seed and recompute the totals.
    pub fn reset(&mut self, lattice: &Lattice, seed: u64) {
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
        self.spins = spins::random_spins(lattice.n_spins, &mut self.rng);
        (self.energy, self.magnetization) = self.recompute(lattice);
    }

    /// Advance by one Metropolis proposal and fold its deltas into the totals.
    #[inline]
    pub fn step(&mut self, lattice: &Lattice) -> StepOutcome {
        let outcome = metropolis_step(
            lattice,
            &mut self.spins,
            self.coupling,
            self.temperature,
            &mut self.rng,
        );
        self.energy += outcome.delta_energy;
        self.magnetization += outcome.delta_magnetization;
        outcome
    }

    /// Exact total energy and magnetization of the current configuration.
    pub fn recompute(&self, lattice: &Lattice) -> (f64, i64) {
        (
            energy::total_energy(lattice, &self.spins, self.coupling),
            energy::total_magnetization(&self.spins),
        )
    }
}
