use crate::geometry::Lattice;
use crate::spins::energy::{local_energy, neighbor_spins};
use rand::Rng;

/// Outcome of a single proposed spin flip.
///
/// On rejection both deltas are exactly zero, so callers can fold them into
/// running totals unconditionally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Flat index of the proposed site.
    pub site: usize,
    pub accepted: bool,
    /// Change in total energy.
    pub delta_energy: f64,
    /// Change in total magnetization.
    pub delta_magnetization: i64,
}

/// Energy change of flipping `site`, with all other spins held fixed.
///
/// A neighbour slot that points back at `site` itself (only on a 1x1 lattice)
/// flips together with it.
#[inline]
pub fn flip_energy_change(lattice: &Lattice, spins: &[i8], site: usize, coupling: f64) -> f64 {
    let si = spins[site];
    let current = neighbor_spins(lattice, spins, site);
    let mut flipped = current;
    for (slot, j) in flipped.iter_mut().zip(lattice.neighbors(site)) {
        if j == site {
            *slot = -si;
        }
    }
    local_energy(-si, flipped, coupling) - local_energy(si, current, coupling)
}

/// Propose one single-spin flip and apply the Metropolis criterion.
///
/// The site is drawn uniformly; a flip lowering the energy is always taken
/// without touching the RNG again, otherwise it is taken when a uniform draw
/// `u` satisfies `u <= exp(-dE / T)`.
///
/// `temperature` must be positive.
#[cfg_attr(feature = "profile", inline(never))]
pub fn metropolis_step<R: Rng + ?Sized>(
    lattice: &Lattice,
    spins: &mut [i8],
    coupling: f64,
    temperature: f64,
    rng: &mut R,
) -> StepOutcome {
    debug_assert!(temperature > 0.0);

    let row = rng.gen_range(0..lattice.length);
    let col = rng.gen_range(0..lattice.length);
    let site = lattice.site(row, col);

    let si = spins[site];
    let delta_energy = flip_energy_change(lattice, spins, site, coupling);
    let delta_magnetization = -2 * si as i64;

    let accepted = delta_energy < 0.0 || rng.gen::<f64>() <= (-delta_energy / temperature).exp();

    if accepted {
        spins[site] = -si;
        StepOutcome {
            site,
            accepted,
            delta_energy,
            delta_magnetization,
        }
    } else {
        StepOutcome {
            site,
            accepted,
            delta_energy: 0.0,
            delta_magnetization: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spins::energy::{total_energy, total_magnetization};
    use crate::spins::random_spins;
    use approx::assert_abs_diff_eq;
    use rand::{RngCore, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    fn checkerboard(lat: &Lattice) -> Vec<i8> {
        (0..lat.n_spins)
            .map(|i| {
                let (r, c) = lat.coords(i);
                if (r + c) % 2 == 0 {
                    1
                } else {
                    -1
                }
            })
            .collect()
    }

    #[test]
    fn test_flip_energy_change_matches_total() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        for length in [1, 2, 3, 6] {
            let lat = Lattice::new(length);
            let mut spins = random_spins(lat.n_spins, &mut rng);
            for site in 0..lat.n_spins {
                let before = total_energy(&lat, &spins, 1.3);
                let de = flip_energy_change(&lat, &spins, site, 1.3);
                spins[site] = -spins[site];
                let after = total_energy(&lat, &spins, 1.3);
                assert_abs_diff_eq!(after - before, de, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_downhill_flip_accepted_without_draw() {
        // On a checkerboard with J > 0 every flip lowers the energy by 8J
        let lat = Lattice::new(4);
        let mut spins = checkerboard(&lat);
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let mut shadow = rng.clone();

        let before = spins.clone();
        let outcome = metropolis_step(&lat, &mut spins, 1.0, 2.0, &mut rng);

        assert!(outcome.accepted);
        assert_eq!(outcome.delta_energy, -8.0);
        assert_eq!(outcome.delta_magnetization, -2 * before[outcome.site] as i64);
        assert_eq!(spins[outcome.site], -before[outcome.site]);

        // Only the two site draws were consumed
        let row = shadow.gen_range(0..lat.length);
        let col = shadow.gen_range(0..lat.length);
        assert_eq!(lat.site(row, col), outcome.site);
        assert_eq!(rng.next_u64(), shadow.next_u64());
    }

    #[test]
    fn test_rejected_flip_leaves_state_untouched() {
        // All aligned with J > 0 at very low T: dE = +8 and exp(-8/T) underflows
        let lat = Lattice::new(5);
        let mut spins = vec![1i8; lat.n_spins];
        let mut rng = Xoshiro256StarStar::seed_from_u64(2);

        for _ in 0..200 {
            let outcome = metropolis_step(&lat, &mut spins, 1.0, 1e-3, &mut rng);
            assert!(!outcome.accepted);
            assert_eq!(outcome.delta_energy, 0.0);
            assert_eq!(outcome.delta_magnetization, 0);
        }
        assert_eq!(spins, vec![1i8; lat.n_spins]);
    }

    #[test]
    fn test_zero_delta_always_accepted() {
        // J = 0: dE = 0 so exp(0) = 1 >= any uniform draw
        let lat = Lattice::new(3);
        let mut spins = vec![1i8; lat.n_spins];
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        for _ in 0..100 {
            let outcome = metropolis_step(&lat, &mut spins, 0.0, 1.0, &mut rng);
            assert!(outcome.accepted);
        }
    }

    #[test]
    fn test_single_site_lattice_always_flips() {
        // L = 1: the site is its own neighbour four times, every bond flips
        // with it, so dE = 0 and the proposal is taken at any J and T
        let lat = Lattice::new(1);
        let mut spins = vec![1i8];
        let mut rng = Xoshiro256StarStar::seed_from_u64(8);
        for (coupling, temperature) in [(1.0, 1e-3), (-2.5, 0.5), (1.0, 10.0)] {
            for _ in 0..50 {
                let before = spins[0];
                let outcome = metropolis_step(&lat, &mut spins, coupling, temperature, &mut rng);
                assert_eq!(outcome.site, 0);
                assert!(outcome.accepted);
                assert_eq!(outcome.delta_energy, 0.0);
                assert_eq!(outcome.delta_magnetization, -2 * before as i64);
                assert_eq!(spins[0], -before);
            }
        }
    }

    #[test]
    fn test_incremental_totals_match_recomputation() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1234);
        for (length, coupling, temperature) in [(2, 1.0, 1.0), (5, -0.5, 0.8), (10, 1.0, 2.27)] {
            let lat = Lattice::new(length);
            let mut spins = random_spins(lat.n_spins, &mut rng);
            let mut energy = total_energy(&lat, &spins, coupling);
            let mut mag = total_magnetization(&spins);

            for _ in 0..20_000 {
                let outcome = metropolis_step(&lat, &mut spins, coupling, temperature, &mut rng);
                energy += outcome.delta_energy;
                mag += outcome.delta_magnetization;
            }

            assert_abs_diff_eq!(energy, total_energy(&lat, &spins, coupling), epsilon = 1e-9);
            assert_eq!(mag, total_magnetization(&spins));
        }
    }
}
