pub mod config;
pub mod error;
pub mod exact;
pub mod geometry;
pub mod mcmc;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{ModelConfig, SimConfig};
pub use error::{SimError, SimResult};
pub use geometry::Lattice;
pub use simulation::{run_chain, simulate, Chain};
pub use statistics::{ChainResult, Observables, ResultRecord};
