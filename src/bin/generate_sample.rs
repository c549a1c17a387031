use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dwi_gradcheck::GradientRecord;

/// Write a duplicated gradient scheme for trying out dwi-gradcheck
#[derive(Parser, Debug)]
#[command(name = "generate-sample")]
struct Args {
    /// Output path
    #[arg(default_value = "grad")]
    output: PathBuf,

    /// Diffusion-weighted directions per shell
    #[arg(short, long, default_value_t = 30)]
    directions: usize,

    /// Largest per-component offset applied to second-half directions
    #[arg(short, long, default_value_t = 0.005)]
    jitter: f64,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Deterministic direction source (splitmix64).
struct DirectionRng(u64);

impl DirectionRng {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-half_width, half_width)`.
    fn symmetric(&mut self, half_width: f64) -> f64 {
        (2.0 * self.next_f64() - 1.0) * half_width
    }

    /// Uniformly distributed point on the unit sphere (Archimedes' projection).
    fn unit_vector(&mut self) -> [f64; 3] {
        let z = self.symmetric(1.0);
        let phi = 2.0 * std::f64::consts::PI * self.next_f64();
        let r = (1.0 - z * z).sqrt();
        [r * phi.cos(), r * phi.sin(), z]
    }
}

/// Perturb a non-zero direction by up to `jitter` per component, then
/// bring it back to unit length.
fn jittered(r: &GradientRecord, jitter: f64, rng: &mut DirectionRng) -> GradientRecord {
    if r.is_zero_direction() {
        return *r;
    }
    GradientRecord::new(
        r.x + rng.symmetric(jitter),
        r.y + rng.symmetric(jitter),
        r.z + rng.symmetric(jitter),
        r.b,
    )
    .normalized()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = DirectionRng(args.seed);

    let shells = [1000.0, 2000.0];
    let b0_count = 3;

    // First half: b=0 volumes, then each shell's directions
    let mut scheme: Vec<GradientRecord> = (0..b0_count)
        .map(|_| GradientRecord::new(0.0, 0.0, 0.0, 0.0))
        .collect();
    for &b in &shells {
        for _ in 0..args.directions {
            let [x, y, z] = rng.unit_vector();
            scheme.push(GradientRecord::new(x, y, z, b));
        }
    }

    let repeat: Vec<GradientRecord> = scheme
        .iter()
        .map(|r| jittered(r, args.jitter, &mut rng))
        .collect();

    let file = std::fs::File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut w = BufWriter::new(file);
    for r in scheme.iter().chain(&repeat) {
        writeln!(w, "{:.6} {:.6} {:.6} {}", r.x, r.y, r.z, r.b)?;
    }
    w.flush()?;

    println!(
        "Wrote {} gradient records ({} per half) to {}",
        scheme.len() + repeat.len(),
        scheme.len(),
        args.output.display()
    );
    Ok(())
}
