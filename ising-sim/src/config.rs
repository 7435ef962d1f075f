use crate::error::{SimError, SimResult};
use validator::{Validate, ValidationError};

fn validate_model_config(cfg: &ModelConfig) -> Result<(), ValidationError> {
    if cfg.length < 1 {
        return Err(ValidationError::new("length must be >= 1"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new("coupling must be finite"));
    }
    if !(cfg.temperature.is_finite() && cfg.temperature > 0.0) {
        return Err(ValidationError::new("temperature must be finite and > 0"));
    }
    Ok(())
}

/// Physical parameters of one run: lattice side, coupling `J`, temperature `T`.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
#[validate(schema(function = "validate_model_config"))]
pub struct ModelConfig {
    pub length: usize,
    pub coupling: f64,
    pub temperature: f64,
}

impl ModelConfig {
    pub fn n_spins(&self) -> usize {
        self.length * self.length
    }

    pub fn check(&self) -> SimResult<()> {
        Ok(self.validate()?)
    }
}

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.n_iterations < 1 {
        return Err(ValidationError::new("n_iterations must be >= 1"));
    }
    if cfg.sample_interval < 1 {
        return Err(ValidationError::new("sample_interval must be >= 1"));
    }
    Ok(())
}

/// Iteration budget and sampling schedule.
///
/// A sample is taken at iteration `i` when `i >= start_sample` and
/// `i % sample_interval == 0`; the stride is anchored at iteration 0, not at
/// `start_sample`.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    pub n_iterations: u64,
    pub start_sample: u64,
    pub sample_interval: u64,
}

impl SimConfig {
    /// `floor((n_iterations - start_sample) / sample_interval)`, or 0 when
    /// sampling would start at or after the last iteration.
    pub fn expected_samples(&self) -> u64 {
        if self.sample_interval == 0 {
            return 0;
        }
        self.n_iterations.saturating_sub(self.start_sample) / self.sample_interval
    }

    /// Whether iteration `i` is recorded.
    #[inline]
    pub fn is_sample(&self, i: u64) -> bool {
        i >= self.start_sample && i % self.sample_interval == 0
    }

    /// Field validation followed by the zero-sample guard.
    pub fn check(&self) -> SimResult<()> {
        self.validate()?;
        if self.expected_samples() == 0 {
            return Err(SimError::NoSampling {
                n_iterations: self.n_iterations,
                start_sample: self.start_sample,
                sample_interval: self.sample_interval,
            });
        }
        Ok(())
    }
}
