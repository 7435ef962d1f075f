pub mod results;
mod stats;

pub use results::{ChainResult, Observables, ResultRecord};
pub use stats::Statistics;
