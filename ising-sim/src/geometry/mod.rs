pub mod lattice;

pub use lattice::{periodic_index, Lattice, DIRECTIONS, N_NEIGHBORS};
