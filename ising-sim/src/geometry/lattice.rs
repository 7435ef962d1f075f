/// Neighbour directions in the order they are stored in the neighbour table.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Number of nearest neighbours per site on the square lattice.
pub const N_NEIGHBORS: usize = DIRECTIONS.len();

/// Wrap an arbitrary index onto `[0, len)` under periodic boundary conditions.
#[inline]
pub fn periodic_index(i: isize, len: usize) -> usize {
    i.rem_euclid(len as isize) as usize
}

/// Periodic square lattice with precomputed neighbor table.
///
/// Sites are indexed in row-major order: site `row * length + col`.
pub struct Lattice {
    /// Side length `L`.
    pub length: usize,
    /// Total number of sites, `L * L`.
    pub n_spins: usize,
    /// Layout: `neighbors[site * N_NEIGHBORS + d]` is the neighbour of `site`
    /// in direction `DIRECTIONS[d]` (up, down, left, right).
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Create an `length x length` periodic lattice.
    pub fn new(length: usize) -> Self {
        assert!(length > 0, "lattice length must be positive");
        let n_spins = length * length;

        let mut neighbors = vec![0u32; n_spins * N_NEIGHBORS];
        for row in 0..length {
            for col in 0..length {
                let i = row * length + col;
                for (d, &(dr, dc)) in DIRECTIONS.iter().enumerate() {
                    let r = periodic_index(row as isize + dr, length);
                    let c = periodic_index(col as isize + dc, length);
                    neighbors[i * N_NEIGHBORS + d] = (r * length + c) as u32;
                }
            }
        }

        Self {
            length,
            n_spins,
            neighbors,
        }
    }

    #[inline]
    pub fn site(&self, row: usize, col: usize) -> usize {
        row * self.length + col
    }

    #[inline]
    pub fn coords(&self, site: usize) -> (usize, usize) {
        (site / self.length, site % self.length)
    }

    /// Return the four neighbours of `site` as `[up, down, left, right]`.
    #[inline]
    pub fn neighbors(&self, site: usize) -> [usize; N_NEIGHBORS] {
        let base = site * N_NEIGHBORS;
        [
            self.neighbors[base] as usize,
            self.neighbors[base + 1] as usize,
            self.neighbors[base + 2] as usize,
            self.neighbors[base + 3] as usize,
        ]
    }
}
