use std::path::PathBuf;

use clap::Parser;
use ising_sim::{ModelConfig, SimConfig};

/// 2D Ising model Metropolis-Hastings simulation.
///
/// Computes four quantities per spin: energy, magnetization, heat capacity
/// and magnetic susceptibility, and appends them to OUTPUT.
#[derive(Parser, Debug)]
#[command(name = "ising-mh", version, allow_negative_numbers = true)]
pub struct Args {
    /// Square lattice length (positive integer).
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub length: u32,

    /// Nearest neighbour coupling J.
    #[arg(value_parser = parse_finite)]
    pub coupling: f64,

    /// Temperature (positive).
    #[arg(value_parser = parse_temperature)]
    pub temperature: f64,

    /// Number of iterations (single spin-flip proposals).
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub iterations: u64,

    /// Iteration at which sampling begins.
    pub start_sample: u64,

    /// Iteration interval between samples.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub sample_interval: u64,

    /// File to append the result line to (created if absent).
    #[arg(value_name = "FILE")]
    pub output: PathBuf,

    /// PRNG seed; defaults to one derived from the system clock.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Disable the progress bar.
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

/// Plain decimal: a digit first, then digits with at most one `.`.
/// No sign, exponent, leading dot or `inf`/`nan` spellings.
fn is_plain_decimal(s: &str) -> bool {
    let mut chars = s.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    let mut seen_dot = false;
    chars.all(|c| match c {
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        c => c.is_ascii_digit(),
    })
}

fn parse_decimal(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !v.is_finite() {
        return Err(format!("'{s}' is not a finite number"));
    }
    Ok(v)
}

/// Real number with an optional leading minus.
fn parse_finite(s: &str) -> Result<f64, String> {
    if !is_plain_decimal(s.strip_prefix('-').unwrap_or(s)) {
        return Err(format!("'{s}' is not a number (expected e.g. -1.5)"));
    }
    parse_decimal(s)
}

fn parse_temperature(s: &str) -> Result<f64, String> {
    if !is_plain_decimal(s) {
        return Err(format!("'{s}' is not a positive number (expected e.g. 2.269)"));
    }
    let v = parse_decimal(s)?;
    if v <= 0.0 {
        return Err(format!("temperature must be > 0, got {v}"));
    }
    Ok(v)
}

impl Args {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            length: self.length as usize,
            coupling: self.coupling,
            temperature: self.temperature,
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            n_iterations: self.iterations,
            start_sample: self.start_sample,
            sample_interval: self.sample_interval,
        }
    }
}
