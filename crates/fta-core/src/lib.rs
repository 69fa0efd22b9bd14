//! Follow-the-average social influence model.
//!
//! Simulates social influence on body-mass index across a fixed
//! Watts-Strogatz small-world network. Each tick, every agent (in a freshly
//! randomized order) nudges its BMI toward the mean of its direct contacts
//! whenever the gap exceeds a satisficing radius, with each step capped.
//!
//! The crate is a library: it takes parameters in, hands the result triple
//! (initial BMIs, final BMIs, per-tick mean series) back, and performs no
//! I/O beyond optional TOML config loading. A single seed reproduces an
//! entire run bit for bit.
//!
//! ```
//! use fta_core::{InfluenceSimulation, ModelConfig};
//!
//! let config = ModelConfig {
//!     agents: 50,
//!     ticks: 20,
//!     seed: Some(42),
//!     ..ModelConfig::default()
//! };
//! let output = InfluenceSimulation::from_config(&config)?.run()?;
//! assert_eq!(output.mean_series.len(), 20);
//! # Ok::<(), fta_core::ModelError>(())
//! ```

pub mod config;
pub mod network;
pub mod output;
pub mod rng;
pub mod setup;
pub mod simulation;

pub use config::{BmiDistributionConfig, ConfigError, ModelConfig};
pub use network::{NetworkError, SmallWorldNetwork};
pub use output::{mean, RunOutput, RunSummary};
pub use rng::SimRng;
pub use simulation::{InfluenceSimulation, SimError};

/// Any failure while assembling or running a model from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Simulation(#[from] SimError),
}
