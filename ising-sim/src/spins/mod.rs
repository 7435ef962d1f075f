pub mod energy;

use rand::Rng;

/// Hot start: each of the `n_spins` sites is independently ±1 with equal probability.
pub fn random_spins<R: Rng + ?Sized>(n_spins: usize, rng: &mut R) -> Vec<i8> {
    (0..n_spins)
        .map(|_| if rng.gen::<f64>() < 0.5 { -1 } else { 1 })
        .collect()
}
