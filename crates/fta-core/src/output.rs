//! Run results.
//!
//! The model's entire output is an in-process triple: the initial BMI
//! vector, the final BMI vector, and the per-tick population mean. All types
//! serialize so callers can emit them however they like; the core writes
//! nothing to disk.

use serde::Serialize;

/// Arithmetic mean of a non-empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Everything a completed run produces.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    /// Population BMI before the first tick
    pub initial_bmi: Vec<f64>,
    /// Population BMI after the last tick
    pub final_bmi: Vec<f64>,
    /// Population mean BMI recorded after each tick; length equals the
    /// configured tick count
    pub mean_series: Vec<f64>,
}

impl RunOutput {
    /// Condensed view of a run for logging or quick inspection.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            agents: self.initial_bmi.len(),
            ticks: self.mean_series.len(),
            initial_mean: mean(&self.initial_bmi),
            final_mean: mean(&self.final_bmi),
        }
    }
}

/// Headline numbers for a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub agents: usize,
    pub ticks: usize,
    pub initial_mean: f64,
    pub final_mean: f64,
}
