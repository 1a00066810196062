// src/state/mod.rs
use serde::{Deserialize, Serialize};

use crate::clock::ArrivalClock;
use crate::config::{ConvergenceConfig, IndependenceConfig, SplitMergeConfig};
use crate::dist::{exponential_pdf, PoissonPmf};
use crate::engine::convergence::{run_convergence, ConvergenceResult};
use crate::engine::independence::{run_independence, IndependenceResult};
use crate::engine::split_merge::{SplitMergeEngine, TickReport};
use crate::histogram::{continuous_histogram, ContinuousHistogram, HistogramScale};
use crate::sampling::Sampler;
use crate::stats::{linear_fit, mean, Regression};

const ARRIVAL_WINDOW: usize = 100;
const ARRIVAL_MAX_BINS: usize = 50;

/// Snapshot of the animated arrivals demo: the rolling inter-arrival window
/// binned against the exponential PDF, plus the adjacent-pair fit used as
/// the live independence check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrivalSnapshot {
    pub histogram: Option<ContinuousHistogram>,
    pub fit: Regression,
    pub sample_mean: f64,
    pub theoretical_mean: f64,
}

/// The whole simulation context: every piece of mutable demo state lives
/// here and is only ever touched through a command or one of these methods,
/// never through ambient globals.
#[derive(Debug)]
pub struct LabState {
    pub sampler: Sampler,
    pub emitters: SplitMergeEngine,
    pub arrivals: ArrivalClock,
    pub independence: IndependenceConfig,
    pub convergence: ConvergenceConfig,
    pub latest_independence: Option<IndependenceResult>,
    pub latest_convergence: Option<ConvergenceResult>,
    pub last_tick: Option<TickReport>,
    /// Inline validation message for out-of-range manual entry; cleared on
    /// the next valid input.
    pub error_message: Option<String>,
    pmf: PoissonPmf,
}

impl LabState {
    pub fn new(seed: Option<u64>) -> Self {
        let independence = IndependenceConfig::default();
        Self {
            sampler: Sampler::new(seed),
            emitters: SplitMergeEngine::new(SplitMergeConfig::default()),
            arrivals: ArrivalClock::new(independence.rate, ARRIVAL_WINDOW),
            independence,
            convergence: ConvergenceConfig::default(),
            latest_independence: None,
            latest_convergence: None,
            last_tick: None,
            error_message: None,
            pmf: PoissonPmf::new(),
        }
    }

    /// Run one batch of independence trials and keep the result for the
    /// chart layer.
    pub fn run_independence(&mut self) {
        let result = run_independence(&self.independence, &mut self.sampler);
        self.latest_independence = Some(result);
    }

    /// Recompute the convergence curves. An out-of-range lambda surfaces an
    /// inline message but still renders, with lambda clamped to n.
    pub fn run_convergence(&mut self) {
        self.error_message = self.convergence.validate().err().map(|e| e.to_string());
        let result = run_convergence(&self.convergence, &mut self.pmf);
        self.latest_convergence = Some(result);
    }

    /// Live view of the animated arrivals demo.
    pub fn arrival_snapshot(&self) -> ArrivalSnapshot {
        let rate = self.arrivals.rate();
        let intervals = self.arrivals.intervals().as_vec();
        let histogram = continuous_histogram(
            &intervals,
            ARRIVAL_MAX_BINS,
            HistogramScale::Counts,
            |x| exponential_pdf(x, rate),
        );
        let fit = linear_fit(&self.arrivals.intervals().adjacent_pairs());
        ArrivalSnapshot {
            histogram,
            fit,
            sample_mean: mean(&intervals),
            theoretical_mean: if rate > 0.0 { 1.0 / rate } else { f64::INFINITY },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_no_results() {
        let state = LabState::new(Some(1));
        assert!(state.latest_independence.is_none());
        assert!(state.latest_convergence.is_none());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn run_independence_stores_a_result() {
        let mut state = LabState::new(Some(2));
        state.run_independence();
        let result = state.latest_independence.as_ref().unwrap();
        assert_eq!(result.trials, state.independence.trials);
    }

    #[test]
    fn convergence_with_invalid_lambda_still_renders() {
        let mut state = LabState::new(Some(3));
        state.convergence = ConvergenceConfig { n: 20, lambda: 35.0 };
        state.run_convergence();
        assert!(state.error_message.is_some());
        let result = state.latest_convergence.as_ref().unwrap();
        assert_eq!(result.lambda, 20.0);

        state.convergence = ConvergenceConfig { n: 20, lambda: 5.0 };
        state.run_convergence();
        assert!(state.error_message.is_none());
    }

    #[test]
    fn arrival_snapshot_reflects_the_rolling_window() {
        let mut state = LabState::new(Some(4));
        state.arrivals.start(&mut state.sampler);
        for _ in 0..10_000 {
            state.arrivals.advance(0.02, &mut state.sampler);
        }
        let snapshot = state.arrival_snapshot();
        assert!(snapshot.histogram.is_some());
        assert!((snapshot.theoretical_mean - 1.0).abs() < 1e-12);
        // Consecutive intervals should show no linear dependence.
        assert!(snapshot.fit.slope.abs() < 0.3);
    }
}
