//! Writes a demo recording: a synthetic walking accelerometer at 204.8 Hz,
//! low-pass filtered at 5 Hz and downsampled by 4, as Parquet and CSV.

use std::f64::consts::PI;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ndarray::Array2;
use nilspod_datastream::{Datastream, FilterType};

/// Seeded noise source for the synthetic accelerometer, so every run writes
/// the same walking recording (xoshiro256** with Box-Muller for Gaussian noise).
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Three-axis accelerometer of a walking subject: gravity on z, a 1.8 Hz
/// step oscillation on every axis and sensor noise.
fn walking_acc(samples: usize, sampling_rate_hz: f64, rng: &mut SimpleRng) -> Array2<f64> {
    let offsets = [0.0, 0.0, 9.81];
    let amplitudes = [1.2, 0.6, 2.5];
    Array2::from_shape_fn((samples, 3), |(i, axis)| {
        let t = i as f64 / sampling_rate_hz;
        offsets[axis] + amplitudes[axis] * (2.0 * PI * 1.8 * t).sin() + rng.gauss(0.0, 0.3)
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_acc.parquet"));

    let mut rng = SimpleRng::new(42);
    let sampling_rate_hz = 204.8;
    let raw = Datastream::new(walking_acc(4096, sampling_rate_hz, &mut rng))
        .with_sampling_rate(sampling_rate_hz)
        .with_sensor("acc")
        .calibrated(true);
    log::info!("generated {} samples at {} Hz", raw.len(), raw.sampling_rate_hz);

    let mut smooth = raw.clone();
    smooth.data = raw
        .filter_butterworth(5.0, 4, FilterType::Lowpass)
        .context("low-pass filtering")?;
    let downsampled = smooth.downsample(4).context("downsampling")?;

    let norm = downsampled.norm();
    log::info!(
        "downsampled to {} samples at {} Hz, mean |acc| = {:.3} {}",
        downsampled.len(),
        downsampled.sampling_rate_hz,
        norm.mean().unwrap_or(f64::NAN),
        downsampled.unit()
    );

    let table = downsampled.data_as_df(true).context("building table")?;

    let file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    table
        .write_parquet(file)
        .with_context(|| format!("writing {}", output_path.display()))?;

    let csv_path = output_path.with_extension("csv");
    let file = File::create(&csv_path).with_context(|| format!("creating {}", csv_path.display()))?;
    table
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("writing {}", csv_path.display()))?;

    println!(
        "Wrote {} samples ({} channels: {}) to {} and {}",
        downsampled.len(),
        downsampled.channels(),
        table.column_names().join(", "),
        output_path.display(),
        csv_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walking_acc_is_reproducible() {
        let a = walking_acc(256, 204.8, &mut SimpleRng::new(42));
        let b = walking_acc(256, 204.8, &mut SimpleRng::new(42));
        assert_eq!(a, b);
        assert_eq!(a.dim(), (256, 3));

        let other = walking_acc(256, 204.8, &mut SimpleRng::new(7));
        assert_ne!(a, other);
    }

    #[test]
    fn test_walking_acc_carries_gravity_on_z() {
        let acc = walking_acc(2048, 204.8, &mut SimpleRng::new(42));
        let means: Vec<f64> = acc
            .mean_axis(ndarray::Axis(0))
            .unwrap()
            .to_vec();
        assert!(means[0].abs() < 0.2);
        assert!(means[1].abs() < 0.2);
        assert!((means[2] - 9.81).abs() < 0.2);
    }
}
