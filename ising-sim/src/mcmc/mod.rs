pub mod metropolis;

pub use metropolis::{flip_energy_change, metropolis_step, StepOutcome};
