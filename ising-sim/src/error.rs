use thiserror::Error;

/// Errors surfaced by the simulation core.
///
/// All of them are precondition violations caught before (or, for
/// [`SimError::Interrupted`], between) Monte Carlo iterations.
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration field is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The burn-in and sampling stride leave no iteration to sample.
    #[error(
        "no sampling: {n_iterations} iterations starting at {start_sample} \
         with interval {sample_interval} yield zero samples"
    )]
    NoSampling {
        n_iterations: u64,
        start_sample: u64,
        sample_interval: u64,
    },

    /// The chain finished without recording a sample.
    #[error("no samples recorded, observables are undefined")]
    NoSamples,

    #[error("interrupted")]
    Interrupted,
}

impl From<validator::ValidationErrors> for SimError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::InvalidConfig(format!("{e}"))
    }
}

pub type SimResult<T> = Result<T, SimError>;
