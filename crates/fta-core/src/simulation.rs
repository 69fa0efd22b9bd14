//! The follow-the-average influence simulation.
//!
//! Each tick, every agent gets one opportunity to update, in a freshly
//! shuffled order. An agent compares its BMI to the mean of its neighbors'
//! current values; gaps within the satisficing radius are ignored, larger
//! gaps trigger a correction toward the mean capped at `step_cap`. Updates
//! are asynchronous: an agent late in the tick order reads values already
//! updated earlier in the same tick.

use crate::config::ModelConfig;
use crate::network::{NetworkError, SmallWorldNetwork};
use crate::output::{mean, RunOutput};
use crate::rng::SimRng;
use crate::setup;
use crate::ModelError;

/// A fully assembled model, ready to run once.
///
/// Owns the trait vector and the RNG; the network is fixed at construction
/// and read-only thereafter. All invalid-parameter conditions are rejected
/// here, so `run` has no configuration-dependent failure modes.
#[derive(Debug)]
pub struct InfluenceSimulation {
    satisficing_radius: f64,
    step_cap: f64,
    ticks: usize,
    network: SmallWorldNetwork,
    bmi: Vec<f64>,
    rng: SimRng,
}

impl InfluenceSimulation {
    /// Assembles a model from explicit parts.
    ///
    /// Fails fast on a malformed radius or step cap, a trait vector whose
    /// length disagrees with the network, or any zero-neighbor agent (an
    /// isolated agent has no defined neighbor mean, so the model refuses to
    /// start rather than guessing an update rule for it).
    pub fn new(
        satisficing_radius: f64,
        network: SmallWorldNetwork,
        initial_bmi: Vec<f64>,
        ticks: usize,
        step_cap: f64,
        rng: SimRng,
    ) -> Result<Self, SimError> {
        if satisficing_radius.is_nan() || satisficing_radius < 0.0 {
            return Err(SimError::NegativeRadius {
                radius: satisficing_radius,
            });
        }
        if step_cap.is_nan() || step_cap <= 0.0 {
            return Err(SimError::InvalidStepCap { step_cap });
        }
        if initial_bmi.len() != network.len() {
            return Err(SimError::AgentCountMismatch {
                agents: initial_bmi.len(),
                nodes: network.len(),
            });
        }
        for agent in 0..network.len() {
            if network.degree(agent)? == 0 {
                return Err(SimError::IsolatedAgent { agent });
            }
        }

        Ok(Self {
            satisficing_radius,
            step_cap,
            ticks,
            network,
            bmi: initial_bmi,
            rng,
        })
    }

    /// Assembles a model from a validated configuration: seed the RNG, draw
    /// the initial BMI vector, build the network, then wire everything
    /// together. The draw order (traits before topology) is part of the
    /// reproducibility contract for a given seed.
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SimRng::seed_from_u64(seed),
            None => SimRng::from_entropy(),
        };
        let initial_bmi = setup::sample_initial_bmi(&config.initial_bmi, config.agents, &mut rng)?;
        let network =
            SmallWorldNetwork::new(config.agents, config.mean_degree, config.rewiring_prob, &mut rng)?;

        tracing::info!(
            agents = config.agents,
            mean_degree = config.mean_degree,
            rewiring_prob = config.rewiring_prob,
            seed = ?config.seed,
            "model assembled"
        );

        Ok(Self::new(
            config.satisficing_radius,
            network,
            initial_bmi,
            config.ticks,
            config.step_cap,
            rng,
        )?)
    }

    /// The network the model runs on.
    pub fn network(&self) -> &SmallWorldNetwork {
        &self.network
    }

    /// Current BMI vector, index-aligned with the network's nodes.
    pub fn bmi(&self) -> &[f64] {
        &self.bmi
    }

    /// Runs the model for the configured number of ticks and returns the
    /// initial snapshot, the final BMI vector, and the per-tick mean series.
    pub fn run(mut self) -> Result<RunOutput, SimError> {
        tracing::info!(agents = self.bmi.len(), ticks = self.ticks, "running simulation");

        let initial_bmi = self.bmi.clone();
        let mut mean_series = Vec::with_capacity(self.ticks);
        let mut order: Vec<usize> = (0..self.bmi.len()).collect();

        for tick in 0..self.ticks {
            // Fresh activation order every tick: no agent is systematically
            // first or last.
            self.rng.shuffle(&mut order);

            for &agent in &order {
                let neighbors = self.network.get_neighbors(agent)?;
                let neighbor_mean =
                    neighbors.iter().map(|&j| self.bmi[j]).sum::<f64>() / neighbors.len() as f64;

                let diff = self.bmi[agent] - neighbor_mean;
                if diff.abs() > self.satisficing_radius {
                    let step = diff.abs().min(self.step_cap);
                    if diff > 0.0 {
                        self.bmi[agent] -= step;
                    } else {
                        self.bmi[agent] += step;
                    }
                }
            }

            mean_series.push(mean(&self.bmi));
            tracing::debug!(tick, mean_bmi = mean_series[tick], "tick complete");
        }

        Ok(RunOutput {
            initial_bmi,
            final_bmi: self.bmi,
            mean_series,
        })
    }
}

/// Errors from assembling or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The satisficing radius is a non-negative tolerance
    #[error("satisficing radius must be non-negative, got {radius}")]
    NegativeRadius { radius: f64 },
    /// The step cap bounds every per-tick change
    #[error("step cap must be positive, got {step_cap}")]
    InvalidStepCap { step_cap: f64 },
    /// The trait vector must be index-aligned with the network
    #[error("initial BMI vector has {agents} entries but the network has {nodes} nodes")]
    AgentCountMismatch { agents: usize, nodes: usize },
    /// No neighbor mean exists for an agent with zero neighbors
    #[error("agent {agent} has no neighbors; its neighbor mean is undefined")]
    IsolatedAgent { agent: usize },
    /// Neighbor lookup failure during the tick loop
    #[error(transparent)]
    Network(#[from] NetworkError),
}
