//! Initial population seeding.
//!
//! The reference model seeds each agent's BMI from `offset + Gamma(shape,
//! scale)`. The simulation itself accepts any caller-supplied trait vector,
//! so the distribution stays a configuration choice rather than a hard
//! dependency of the update rule.

use rand_distr::Gamma;

use crate::config::{BmiDistributionConfig, ConfigError};
use crate::rng::SimRng;

/// Draws an initial BMI value for each of `agents` agents.
pub fn sample_initial_bmi(
    dist: &BmiDistributionConfig,
    agents: usize,
    rng: &mut SimRng,
) -> Result<Vec<f64>, ConfigError> {
    let gamma =
        Gamma::new(dist.shape, dist.scale).map_err(|_| ConfigError::InvalidBmiDistribution {
            shape: dist.shape,
            scale: dist.scale,
        })?;
    Ok((0..agents).map(|_| dist.offset + rng.sample(&gamma)).collect())
}
