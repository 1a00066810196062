// src/engine/independence.rs
use chrono;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::IndependenceConfig;
use crate::dist::exponential_pdf;
use crate::histogram::{continuous_histogram, ContinuousHistogram, HistogramScale};
use crate::sampling::Sampler;
use crate::series::RollingSeries;
use crate::stats::{linear_fit, mean, Regression};

const MAX_BINS: usize = 50;

/// One batch run of the inter-arrival independence demo.
///
/// Each trial samples a fresh renewal process: `target_index + 1`
/// exponential draws, of which only the i-th (T_i) and (i+1)-th (T_{i+1})
/// are kept as a pair. Trials are independent of each other; within a trial
/// the draws share nothing but the rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndependenceResult {
    pub id: String,
    pub timestamp: String,
    pub rate: f64,
    pub target_index: u32,
    pub trials: usize,
    /// Empirical distribution of T_i with the exponential PDF overlay.
    pub histogram: Option<ContinuousHistogram>,
    /// (T_i, T_{i+1}) scatter points in trial order.
    pub points: Vec<(f64, f64)>,
    /// OLS fit over the scatter; a slope near zero indicates independence.
    pub fit: Regression,
    /// Endpoints of the fit line across the observed x-range.
    pub fit_line: Option<[(f64, f64); 2]>,
    pub sample_mean: f64,
    pub theoretical_mean: f64,
}

/// Run the batch simulation and summarize it for display.
pub fn run_independence(config: &IndependenceConfig, sampler: &mut Sampler) -> IndependenceResult {
    let mut pairs: RollingSeries<(f64, f64)> = RollingSeries::with_capacity(config.trials.max(1));

    for _ in 0..config.trials {
        // Discard the first i - 1 inter-arrival times, keep the next two.
        for _ in 1..config.target_index {
            sampler.exponential(config.rate);
        }
        let target = sampler.exponential(config.rate);
        let next = sampler.exponential(config.rate);
        pairs.push((target, next));
    }

    summarize(config, pairs.as_vec())
}

fn summarize(config: &IndependenceConfig, points: Vec<(f64, f64)>) -> IndependenceResult {
    let targets: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
    let finite = targets.iter().all(|t| t.is_finite());

    let histogram = if finite {
        continuous_histogram(&targets, MAX_BINS, HistogramScale::Counts, |x| {
            exponential_pdf(x, config.rate)
        })
    } else {
        None
    };

    let fit = if finite { linear_fit(&points) } else { Regression::default() };
    let fit_line = fit_line_endpoints(&points, &fit);

    let sample_mean = if finite { mean(&targets) } else { f64::INFINITY };
    let theoretical_mean = if config.rate > 0.0 {
        1.0 / config.rate
    } else {
        f64::INFINITY
    };

    IndependenceResult {
        id: Uuid::new_v4().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        rate: config.rate,
        target_index: config.target_index,
        trials: points.len(),
        histogram,
        points,
        fit,
        fit_line,
        sample_mean,
        theoretical_mean,
    }
}

fn fit_line_endpoints(points: &[(f64, f64)], fit: &Regression) -> Option<[(f64, f64); 2]> {
    if points.len() < 2 {
        return None;
    }
    let min_x = points.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
    if !min_x.is_finite() || !max_x.is_finite() {
        return None;
    }
    Some([
        (min_x, fit.slope * min_x + fit.intercept),
        (max_x, fit.slope * max_x + fit.intercept),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_run_produces_one_pair_per_trial() {
        let config = IndependenceConfig {
            rate: 2.0,
            trials: 250,
            target_index: 3,
        };
        let mut sampler = Sampler::new(Some(41));
        let result = run_independence(&config, &mut sampler);
        assert_eq!(result.points.len(), 250);
        assert_eq!(result.trials, 250);
        assert!(result.histogram.is_some());
        assert!(result.fit_line.is_some());
        assert!(!result.id.is_empty());
    }

    #[test]
    fn sample_mean_tracks_reciprocal_rate() {
        let config = IndependenceConfig {
            rate: 2.0,
            trials: 10_000,
            target_index: 1,
        };
        let mut sampler = Sampler::new(Some(13));
        let result = run_independence(&config, &mut sampler);
        assert!((result.theoretical_mean - 0.5).abs() < 1e-12);
        assert!(
            (result.sample_mean - 0.5).abs() < 0.5 * 0.05,
            "sample mean {}",
            result.sample_mean
        );
    }

    #[test]
    fn adjacent_interarrival_times_look_independent() {
        let config = IndependenceConfig {
            rate: 1.5,
            trials: 10_000,
            target_index: 2,
        };
        let mut sampler = Sampler::new(Some(29));
        let result = run_independence(&config, &mut sampler);
        assert!(
            result.fit.slope.abs() < 0.05,
            "slope {} should be near zero",
            result.fit.slope
        );
        assert!(result.fit.correlation.abs() < 0.05);
    }

    #[test]
    fn degenerate_rate_yields_no_histogram_or_fit() {
        let config = IndependenceConfig {
            rate: 0.0,
            trials: 10,
            target_index: 1,
        };
        let mut sampler = Sampler::new(Some(1));
        let result = run_independence(&config, &mut sampler);
        assert!(result.histogram.is_none());
        assert!(result.fit_line.is_none());
        assert_eq!(result.fit, Regression::default());
        assert!(result.theoretical_mean.is_infinite());
    }

    #[test]
    fn zero_trials_is_an_empty_result_not_an_error() {
        let config = IndependenceConfig {
            rate: 1.0,
            trials: 0,
            target_index: 1,
        };
        let mut sampler = Sampler::new(Some(1));
        let result = run_independence(&config, &mut sampler);
        assert!(result.points.is_empty());
        assert!(result.histogram.is_none());
        assert_eq!(result.sample_mean, 0.0);
    }
}
