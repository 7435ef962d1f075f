use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ising_sim::{exact, ChainResult, ModelConfig, ResultRecord, SimConfig};

/// Open the result file for appending, creating it if absent. Never truncates.
pub fn open_results(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open result file {}", path.display()))
}

/// Append one result line.
pub fn append_record<W: Write>(out: &mut W, record: &ResultRecord) -> io::Result<()> {
    writeln!(out, "{record}")?;
    out.flush()
}

/// Echo the run parameters.
pub fn write_parameters<W: Write>(
    out: &mut W,
    model: &ModelConfig,
    sim: &SimConfig,
    seed: u64,
) -> io::Result<()> {
    writeln!(out, "Square lattice length             L = {}", model.length)?;
    writeln!(out, "Total number of spin        N = LxL = {}", model.n_spins())?;
    writeln!(out, "Nearest neighbour coupling        J = {:.10}", model.coupling)?;
    writeln!(out, "Temperature                       T = {:.10}", model.temperature)?;
    writeln!(out, "Number of iteration                 = {}", sim.n_iterations)?;
    writeln!(out, "Step to begin sampling              = {}", sim.start_sample)?;
    writeln!(out, "Sampling interval                   = {}", sim.sample_interval)?;
    writeln!(out, "Number of sample                    = {}", sim.expected_samples())?;
    writeln!(out, "Seed                                = {seed}")
}

/// Report the estimated observables, with Onsager's values for ferromagnetic runs.
pub fn write_observables<W: Write>(
    out: &mut W,
    model: &ModelConfig,
    result: &ChainResult,
) -> io::Result<()> {
    let o = &result.observables;
    writeln!(out, "E_per_spin = {:.10}", o.energy_per_spin)?;
    writeln!(out, "M_per_spin = {:.10}", o.magnetization_per_spin)?;
    writeln!(out, "C_per_spin = {:.10}", o.heat_capacity_per_spin)?;
    writeln!(out, "X_per_spin = {:.10}", o.susceptibility_per_spin)?;
    writeln!(out, "Samples taken = {}", result.n_samples)?;
    writeln!(
        out,
        "Time elapsed (in sec) = {:.10}",
        result.elapsed.as_secs_f64()
    )?;

    if model.coupling > 0.0 {
        let (j, t) = (model.coupling, model.temperature);
        writeln!(out, "Onsager (L -> inf): Tc = {:.10}", exact::critical_temperature(j))?;
        writeln!(out, "  E_per_spin   = {:.10}", exact::energy_per_spin(j, t))?;
        writeln!(out, "  |M|_per_spin = {:.10}", exact::spontaneous_magnetization(j, t))?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ising_sim::Observables;
    use std::time::Duration;

    fn model() -> ModelConfig {
        ModelConfig {
            length: 2,
            coupling: 1.0,
            temperature: 1.0,
        }
    }

    fn result() -> ChainResult {
        ChainResult {
            observables: Observables {
                energy_per_spin: -1.75,
                magnetization_per_spin: 0.5,
                heat_capacity_per_spin: 0.25,
                susceptibility_per_spin: 0.125,
            },
            n_samples: 90,
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn test_append_never_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let record = ResultRecord::new(&model(), &result());

        for _ in 0..3 {
            let mut file = open_results(&path).unwrap();
            append_record(&mut file, &record).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "1.0000000000, 1.0000000000, -1.7500000000, 0.5000000000, \
             0.2500000000, 0.1250000000, 1.5000000000"
        );
        let parsed: ResultRecord = lines[2].parse().unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_open_results_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("data.txt");
        let err = open_results(&path).unwrap_err();
        assert!(format!("{err:#}").contains("cannot open result file"));
    }

    #[test]
    fn test_console_report() {
        let sim = SimConfig {
            n_iterations: 1000,
            start_sample: 100,
            sample_interval: 10,
        };
        let mut buf = Vec::new();
        write_parameters(&mut buf, &model(), &sim, 3).unwrap();
        write_observables(&mut buf, &model(), &result()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Number of sample                    = 90"));
        assert!(text.contains("E_per_spin = -1.7500000000"));
        assert!(text.contains("Onsager"));
    }
}
