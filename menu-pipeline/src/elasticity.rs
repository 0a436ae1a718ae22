//! Price elasticity sampling.
//!
//! The advisor does not estimate elasticity from data; it draws a synthetic
//! value per item and uses it to gate the bestseller raise rule. The source
//! sits behind a trait so production runs draw entropy-seeded noise while
//! tests and reproducible runs pin the draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Elasticity draws are uniform over this closed range. More negative means
/// more price-sensitive demand.
pub const ELASTICITY_RANGE: (f64, f64) = (-1.5, -0.2);

/// Source of per-item price elasticity values.
///
/// The advisor draws exactly one value per item per run. Draws are
/// ephemeral: they gate the decision table and are never stored on the
/// item view.
pub trait ElasticitySampler {
    /// Draw the next elasticity value.
    fn sample(&mut self) -> f64;
}

/// Uniform random elasticity over [`ELASTICITY_RANGE`].
pub struct UniformElasticity {
    rng: StdRng,
}

impl UniformElasticity {
    /// Entropy-seeded sampler for production runs.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Seeded sampler for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for UniformElasticity {
    fn default() -> Self {
        Self::new()
    }
}

impl ElasticitySampler for UniformElasticity {
    fn sample(&mut self) -> f64 {
        self.rng.gen_range(ELASTICITY_RANGE.0..=ELASTICITY_RANGE.1)
    }
}

/// Fixed elasticity for pinning decision-table outcomes in tests.
pub struct FixedElasticity(pub f64);

impl ElasticitySampler for FixedElasticity {
    fn sample(&mut self) -> f64 {
        self.0
    }
}
