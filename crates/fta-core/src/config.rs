//! Model configuration.
//!
//! Loads model parameters from a TOML file so runs can be tuned without
//! recompiling. Defaults reproduce the reference follow-the-average model:
//! 100 agents on a Watts-Strogatz network (K=4, beta=0.1), satisficing
//! radius 0.1, 200 ticks, initial BMI drawn from `15 + Gamma(3, 4)`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for the initial BMI distribution: `offset + Gamma(shape, scale)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiDistributionConfig {
    /// Gamma shape parameter (alpha)
    pub shape: f64,
    /// Gamma scale parameter (theta)
    pub scale: f64,
    /// Constant added to every draw
    pub offset: f64,
}

impl Default for BmiDistributionConfig {
    fn default() -> Self {
        Self {
            shape: 3.0,
            scale: 4.0,
            offset: 15.0,
        }
    }
}

/// Complete model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Population size N
    pub agents: usize,
    /// Ring-lattice mean degree K (must be even and less than `agents`)
    pub mean_degree: usize,
    /// Per-edge rewiring probability beta, in [0, 1]
    pub rewiring_prob: f64,
    /// Tolerance threshold below which an agent ignores the gap to its
    /// neighbors' mean
    pub satisficing_radius: f64,
    /// Number of discrete ticks to simulate
    pub ticks: usize,
    /// RNG seed; omit for a fresh entropy seed (non-reproducible)
    pub seed: Option<u64>,
    /// Largest single-tick change to an agent's BMI
    pub step_cap: f64,
    /// Initial BMI distribution
    pub initial_bmi: BmiDistributionConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            agents: 100,
            mean_degree: 4,
            rewiring_prob: 0.1,
            satisficing_radius: 0.1,
            ticks: 200,
            seed: None,
            step_cap: 0.1,
            initial_bmi: BmiDistributionConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Toml)
    }

    /// Checks every parameter before any construction work happens.
    ///
    /// Malformed parameters abort model construction; there is no
    /// retry-and-continue path anywhere in the model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents == 0 {
            return Err(ConfigError::ZeroAgents);
        }
        if self.mean_degree % 2 != 0 {
            return Err(ConfigError::OddMeanDegree {
                mean_degree: self.mean_degree,
            });
        }
        if self.mean_degree >= self.agents {
            return Err(ConfigError::DegreeTooLarge {
                mean_degree: self.mean_degree,
                agents: self.agents,
            });
        }
        if !(0.0..=1.0).contains(&self.rewiring_prob) {
            return Err(ConfigError::RewiringProbOutOfRange {
                rewiring_prob: self.rewiring_prob,
            });
        }
        if self.satisficing_radius.is_nan() || self.satisficing_radius < 0.0 {
            return Err(ConfigError::NegativeRadius {
                satisficing_radius: self.satisficing_radius,
            });
        }
        if self.step_cap.is_nan() || self.step_cap <= 0.0 {
            return Err(ConfigError::NonPositiveStepCap {
                step_cap: self.step_cap,
            });
        }
        if self.initial_bmi.shape <= 0.0
            || self.initial_bmi.scale <= 0.0
            || self.initial_bmi.shape.is_nan()
            || self.initial_bmi.scale.is_nan()
        {
            return Err(ConfigError::InvalidBmiDistribution {
                shape: self.initial_bmi.shape,
                scale: self.initial_bmi.scale,
            });
        }
        Ok(())
    }
}

/// Errors detected while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("failed to read config file: {0}")]
    Io(std::io::Error),
    /// Error parsing TOML
    #[error("failed to parse config: {0}")]
    Toml(toml::de::Error),
    /// Population must contain at least one agent
    #[error("agent count must be at least 1")]
    ZeroAgents,
    /// The ring lattice connects K/2 neighbors on each side, so K must be even
    #[error("mean_degree must be even, got {mean_degree}")]
    OddMeanDegree { mean_degree: usize },
    /// A node cannot have more neighbors than there are other nodes
    #[error("mean_degree ({mean_degree}) must be less than agent count ({agents})")]
    DegreeTooLarge { mean_degree: usize, agents: usize },
    /// beta is a probability
    #[error("rewiring_prob must be in [0, 1], got {rewiring_prob}")]
    RewiringProbOutOfRange { rewiring_prob: f64 },
    /// The satisficing radius is a non-negative tolerance
    #[error("satisficing_radius must be non-negative, got {satisficing_radius}")]
    NegativeRadius { satisficing_radius: f64 },
    /// The step cap bounds every per-tick BMI change
    #[error("step_cap must be positive, got {step_cap}")]
    NonPositiveStepCap { step_cap: f64 },
    /// Gamma parameters must be positive
    #[error("initial BMI Gamma parameters must be positive (shape {shape}, scale {scale})")]
    InvalidBmiDistribution { shape: f64, scale: f64 },
}
