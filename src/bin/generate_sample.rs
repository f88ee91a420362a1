use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the synthetic sweep, in the column layout the plotter expects.
#[derive(Serialize)]
struct Trial {
    trial_id: u32,
    cfg_brevity: &'static str,
    cfg_temperature: f64,
    cfg_max_tokens: u32,
    #[serde(rename = "metric_energy_total_J")]
    metric_energy_total_j: f64,
    /// Text so failed runs can carry "N/A" like the real harness writes.
    #[serde(rename = "metric_rougeL")]
    metric_rouge_l: String,
    metric_latency_s: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("results/trials.csv"));

    let mut rng = SimpleRng::new(42);

    // (brevity, tokens generated per answer, quality ceiling)
    let brevity_levels = [
        ("terse", 48.0, 0.31),
        ("short", 96.0, 0.38),
        ("medium", 192.0, 0.43),
        ("long", 384.0, 0.45),
    ];
    let temperatures = [0.0, 0.3, 0.7, 1.0];
    let max_tokens = [256, 512];

    let mut trials = Vec::new();
    let mut trial_id = 0;
    for &(brevity, tokens, ceiling) in &brevity_levels {
        for &temperature in &temperatures {
            for &limit in &max_tokens {
                let generated = f64::min(tokens, f64::from(limit)) * (1.0 + 0.4 * temperature);
                let energy = 2.1 * generated + rng.gauss(0.0, 12.0).abs();
                let quality = ceiling - 0.05 * temperature * temperature + rng.gauss(0.0, 0.01);
                let latency = 0.018 * generated + rng.gauss(0.4, 0.05).abs();

                // Roughly one in twelve runs fails scoring.
                let rouge = if rng.next_f64() < 0.08 {
                    "N/A".to_string()
                } else {
                    format!("{quality:.4}")
                };

                trials.push(Trial {
                    trial_id,
                    cfg_brevity: brevity,
                    cfg_temperature: temperature,
                    cfg_max_tokens: limit,
                    metric_energy_total_j: (energy * 100.0).round() / 100.0,
                    metric_rouge_l: rouge,
                    metric_latency_s: (latency * 1000.0).round() / 1000.0,
                });
                trial_id += 1;
            }
        }
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for trial in &trials {
        writer.serialize(trial).context("writing trial row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {} trials to {}", trials.len(), output_path.display());
    Ok(())
}
