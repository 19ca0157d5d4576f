//! Synthetic sample generation for exercising the detector.
//!
//! Only compiled with the `simulation` feature; production integrations feed
//! the detector from their own upstream and never need an RNG.

use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{DetectorError, Result};
use crate::source::SampleSource;

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

enum Shape {
    /// Independent uniform draws over the full i32 range; yields strict peaks
    /// at roughly one sample in three, the "healthy" density.
    Uniform,
    /// Rounded draws from a normal distribution
    Gaussian(Normal<f64>),
}

/// Seeded pseudo-random sample source
///
/// Uses ChaCha8 so that a run can be reproduced exactly from its seed, which
/// is what makes "the detector alarmed after N samples" reports actionable.
pub struct RandomSource {
    rng: ChaCha8Rng,
    shape: Shape,
}

impl RandomSource {
    /// Uniform samples over the i32 range, centered on zero
    pub fn uniform(seed: Option<u64>) -> Self {
        Self {
            rng: create_rng(seed),
            shape: Shape::Uniform,
        }
    }

    /// Normally distributed samples, rounded to the nearest integer
    ///
    /// # Arguments
    /// * `seed` - RNG seed (random when omitted)
    /// * `mean` - Distribution mean
    /// * `std_dev` - Standard deviation (must be positive and finite)
    pub fn normal(seed: Option<u64>, mean: f64, std_dev: f64) -> Result<Self> {
        // Normal::new itself accepts a negative std_dev; enforce the
        // documented contract here.
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(DetectorError::Config(format!(
                "invalid normal distribution: std_dev {} must be positive and finite",
                std_dev
            )));
        }
        let normal = Normal::new(mean, std_dev)
            .map_err(|e| DetectorError::Config(format!("invalid normal distribution: {}", e)))?;
        Ok(Self {
            rng: create_rng(seed),
            shape: Shape::Gaussian(normal),
        })
    }
}

impl SampleSource for RandomSource {
    fn next_sample(&mut self) -> Option<i64> {
        let sample = match &self.shape {
            Shape::Uniform => i64::from(self.rng.random::<i32>()),
            Shape::Gaussian(normal) => normal.sample(&mut self.rng).round() as i64,
        };
        Some(sample)
    }
}
