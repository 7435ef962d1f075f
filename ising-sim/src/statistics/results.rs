use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::Statistics;
use crate::config::ModelConfig;

/// Thermodynamic estimates, all per spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observables {
    /// ⟨E⟩ / N.
    pub energy_per_spin: f64,
    /// ⟨M⟩ / N.
    pub magnetization_per_spin: f64,
    /// (⟨E²⟩ − ⟨E⟩²) / (T² N).
    pub heat_capacity_per_spin: f64,
    /// (⟨M²⟩ − ⟨M⟩²) / (T N).
    pub susceptibility_per_spin: f64,
}

impl Observables {
    /// Derive the observables from sampled total energy and magnetization.
    ///
    /// Returns `None` when nothing was sampled.
    pub fn from_moments(
        energy: &Statistics,
        magnetization: &Statistics,
        n_spins: usize,
        temperature: f64,
    ) -> Option<Self> {
        let n = n_spins as f64;
        Some(Self {
            energy_per_spin: energy.mean()? / n,
            magnetization_per_spin: magnetization.mean()? / n,
            heat_capacity_per_spin: energy.variance()? / (temperature * temperature * n),
            susceptibility_per_spin: magnetization.variance()? / (temperature * n),
        })
    }
}

/// Output of one Metropolis-Hastings chain.
#[derive(Debug, Clone)]
pub struct ChainResult {
    pub observables: Observables,
    /// Number of recorded samples.
    pub n_samples: u64,
    /// Wall-clock time spent in the iteration loop.
    pub elapsed: Duration,
}

/// One line of the append-only result file.
///
/// Rendered as seven `", "`-separated fields with ten decimals:
/// temperature, coupling, energy, magnetization, heat capacity,
/// susceptibility (all per spin) and elapsed seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRecord {
    pub temperature: f64,
    pub coupling: f64,
    pub observables: Observables,
    pub elapsed_secs: f64,
}

impl ResultRecord {
    pub fn new(model: &ModelConfig, result: &ChainResult) -> Self {
        Self {
            temperature: model.temperature,
            coupling: model.coupling,
            observables: result.observables,
            elapsed_secs: result.elapsed.as_secs_f64(),
        }
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.observables;
        write!(
            f,
            "{:.10}, {:.10}, {:.10}, {:.10}, {:.10}, {:.10}, {:.10}",
            self.temperature,
            self.coupling,
            o.energy_per_spin,
            o.magnetization_per_spin,
            o.heat_capacity_per_spin,
            o.susceptibility_per_spin,
            self.elapsed_secs,
        )
    }
}

impl FromStr for ResultRecord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .trim()
            .split(',')
            .map(|f| {
                f.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid field '{}': {e}", f.trim()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let &[temperature, coupling, e, m, c, x, elapsed_secs] = fields.as_slice() else {
            return Err(format!("expected 7 fields, got {}", fields.len()));
        };

        Ok(Self {
            temperature,
            coupling,
            observables: Observables {
                energy_per_spin: e,
                magnetization_per_spin: m,
                heat_capacity_per_spin: c,
                susceptibility_per_spin: x,
            },
            elapsed_secs,
        })
    }
}
