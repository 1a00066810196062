// src/lib.rs
//! Sampling and statistics engine for interactive probability demos:
//! exponential inter-arrival independence, Poisson splitting/merging, and
//! the Binomial -> Poisson -> Gaussian convergence theorems.
//!
//! The crate owns the numerical side only. Chart rendering, sliders, and
//! the decorative particle animation are external collaborators: they feed
//! [`command::Command`] messages into a [`state::LabState`] and read back
//! serializable chart payloads (label sequences, aligned data series, and
//! scalar summaries).

pub mod clock;
pub mod command;
pub mod config;
pub mod dist;
pub mod engine;
pub mod histogram;
pub mod sampling;
pub mod series;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use clock::{ArrivalClock, RunState};
pub use command::{Command, Demo};
pub use config::{ConvergenceConfig, IndependenceConfig, SplitMergeConfig};
pub use dist::{binomial_pmf, exponential_pdf, gaussian_pdf, FactorialCache, PoissonPmf};
pub use engine::{
    run_convergence, run_independence, ConvergenceResult, IndependenceResult, SplitMergeEngine,
};
pub use histogram::{
    continuous_histogram, discrete_histogram, ContinuousHistogram, DiscreteHistogram,
    HistogramScale,
};
pub use sampling::Sampler;
pub use series::RollingSeries;
pub use state::LabState;
pub use stats::{linear_fit, mean, variance, Regression};
