use crate::geometry::{Lattice, N_NEIGHBORS};

/// Each bond is seen from both endpoints when summing site energies over the
/// square lattice, so the site sum is halved. Tied to 4-connectivity.
const BOND_DOUBLE_COUNT: f64 = 2.0;

/// Energy of the bonds between `spin` and its neighbours: `-J * s * sum(neighbors)`.
#[inline]
pub fn local_energy(spin: i8, neighbors: [i8; N_NEIGHBORS], coupling: f64) -> f64 {
    let field: i32 = neighbors.iter().map(|&s| s as i32).sum();
    -coupling * (spin as i32 * field) as f64
}

/// Spins of the four neighbours of `site`, ordered as [`Lattice::neighbors`].
#[inline]
pub fn neighbor_spins(lattice: &Lattice, spins: &[i8], site: usize) -> [i8; N_NEIGHBORS] {
    lattice.neighbors(site).map(|j| spins[j])
}

/// Total energy `H = -J * sum_<i,j> s_i s_j` of the configuration.
pub fn total_energy(lattice: &Lattice, spins: &[i8], coupling: f64) -> f64 {
    let mut total = 0.0f64;
    for (i, &si) in spins.iter().enumerate().take(lattice.n_spins) {
        total += local_energy(si, neighbor_spins(lattice, spins, i), coupling);
    }
    total / BOND_DOUBLE_COUNT
}

/// Total magnetization, the plain sum of all spins.
pub fn total_magnetization(spins: &[i8]) -> i64 {
    spins.iter().map(|&s| s as i64).sum()
}
