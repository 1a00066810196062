// src/config/demo.rs
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Parameters for the exponential inter-arrival independence demo.
///
/// `target_index` is the i in (T_i, T_{i+1}): each trial replays a fresh
/// renewal process far enough to observe the i-th and (i+1)-th inter-arrival
/// times.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndependenceConfig {
    pub rate: f64,
    pub trials: usize,
    pub target_index: u32,
}

impl Default for IndependenceConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            trials: 500,
            target_index: 1,
        }
    }
}

impl IndependenceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rate <= 0.0 {
            bail!("rate must be positive, got {}", self.rate);
        }
        if self.trials == 0 {
            bail!("trial count must be at least 1");
        }
        if self.target_index == 0 {
            bail!("inter-arrival index starts at 1");
        }
        Ok(())
    }
}

/// Parameters for the Poisson splitting/merging demo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitMergeConfig {
    pub rate1: f64,
    pub rate2: f64,
    /// Rolling window of per-second counts kept for the histograms.
    pub histogram_capacity: usize,
    /// Safety cutoff: outstanding decorative particles above this force a
    /// full reset.
    pub particle_ceiling: u32,
}

impl Default for SplitMergeConfig {
    fn default() -> Self {
        Self {
            rate1: 10.0,
            rate2: 5.0,
            histogram_capacity: 100,
            particle_ceiling: 200,
        }
    }
}

impl SplitMergeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rate1 < 0.0 || self.rate2 < 0.0 {
            bail!("emitter rates must be non-negative");
        }
        if self.histogram_capacity == 0 {
            bail!("histogram capacity must be at least 1");
        }
        Ok(())
    }
}

/// Parameters for the Binomial -> Poisson / Poisson -> Gaussian convergence
/// demo. p is derived as lambda / n, so lambda may not exceed n.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConvergenceConfig {
    pub n: u32,
    pub lambda: f64,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self { n: 100, lambda: 10.0 }
    }
}

impl ConvergenceConfig {
    /// Strict check, used to surface an inline message for manual entry.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            bail!("n must be at least 1");
        }
        if self.lambda < 0.0 {
            bail!("lambda must be non-negative");
        }
        if self.lambda > self.n as f64 {
            bail!(
                "lambda ({}) may not exceed n ({}): p = lambda/n must stay <= 1",
                self.lambda,
                self.n
            );
        }
        Ok(())
    }

    /// Lambda clamped into [0, n]; computation proceeds with this even when
    /// `validate` reports an out-of-range entry.
    pub fn effective_lambda(&self) -> f64 {
        self.lambda.clamp(0.0, self.n as f64)
    }
}
