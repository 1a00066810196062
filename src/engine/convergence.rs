// src/engine/convergence.rs
use serde::{Deserialize, Serialize};

use crate::config::ConvergenceConfig;
use crate::dist::{binomial_pmf, gaussian_pdf, PoissonPmf};

/// Closed-form comparison of Binomial(n, lambda/n) against Poisson(lambda),
/// with the Gaussian approximation (mean lambda, variance lambda) overlaid.
/// No sampling is involved; this demo is pure computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceResult {
    pub n: u32,
    pub lambda: f64,
    pub p: f64,
    pub k_max: u32,
    pub labels: Vec<u32>,
    pub binomial: Vec<f64>,
    pub poisson: Vec<f64>,
    pub gaussian: Vec<f64>,
    /// Mean |Binomial - Poisson| over 0..=k_max; shrinks as n grows.
    pub avg_abs_error: f64,
}

/// Evaluate the three curves over k = 0..=k_max, where
/// k_max = min(n, ceil(lambda + 4 * sqrt(lambda))) covers the bulk of the
/// mass without plotting the far tail.
pub fn run_convergence(config: &ConvergenceConfig, pmf: &mut PoissonPmf) -> ConvergenceResult {
    let n = config.n.max(1);
    let lambda = config.effective_lambda();
    let p = lambda / n as f64;

    let raw_k = (lambda + 4.0 * lambda.sqrt()).ceil() as u32;
    let k_max = raw_k.min(n);

    let labels: Vec<u32> = (0..=k_max).collect();
    let binomial = binomial_pmf(n, p, k_max);
    let poisson: Vec<f64> = labels.iter().map(|&k| pmf.eval(lambda, k)).collect();
    let gaussian: Vec<f64> = labels
        .iter()
        .map(|&k| gaussian_pdf(k as f64, lambda, lambda))
        .collect();

    let avg_abs_error = binomial
        .iter()
        .zip(&poisson)
        .map(|(b, q)| (b - q).abs())
        .sum::<f64>()
        / (k_max as f64 + 1.0);

    ConvergenceResult {
        n,
        lambda,
        p,
        k_max,
        labels,
        binomial,
        poisson,
        gaussian,
        avg_abs_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(n: u32, lambda: f64) -> ConvergenceResult {
        let config = ConvergenceConfig { n, lambda };
        let mut pmf = PoissonPmf::new();
        run_convergence(&config, &mut pmf)
    }

    #[test]
    fn k_range_covers_the_bulk_of_the_mass() {
        let result = run(100, 10.0);
        assert_eq!(result.k_max, 23); // ceil(10 + 4 * sqrt(10))
        assert_eq!(result.labels.len(), 24);
        let poisson_mass: f64 = result.poisson.iter().sum();
        assert!(poisson_mass > 0.999);
    }

    #[test]
    fn k_range_is_capped_at_n() {
        let result = run(8, 6.0);
        assert_eq!(result.k_max, 8);
        assert_eq!(result.binomial.len(), 9);
    }

    #[test]
    fn error_shrinks_as_n_grows() {
        let coarse = run(20, 10.0);
        let medium = run(200, 10.0);
        let fine = run(2_000, 10.0);
        assert!(medium.avg_abs_error < coarse.avg_abs_error);
        assert!(fine.avg_abs_error < medium.avg_abs_error);
        assert!(fine.avg_abs_error < 1e-3);
    }

    #[test]
    fn lambda_above_n_is_clamped() {
        let result = run(50, 80.0);
        assert_eq!(result.lambda, 50.0);
        assert_eq!(result.p, 1.0);
        // Degenerate binomial: all mass at k = n.
        assert_eq!(result.binomial[50], 1.0);
        assert!(result.binomial[..50].iter().all(|&b| b == 0.0));
    }

    #[test]
    fn gaussian_overlay_peaks_near_lambda() {
        let result = run(1_000, 25.0);
        let peak = result
            .gaussian
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, 25);
        // Normal(lambda, lambda) approximates the Poisson mass there.
        assert!((result.gaussian[25] - result.poisson[25]).abs() < 0.005);
    }

    #[test]
    fn zero_lambda_degenerates_cleanly() {
        let result = run(100, 0.0);
        assert_eq!(result.k_max, 0);
        assert_eq!(result.binomial, vec![1.0]);
        assert_eq!(result.poisson, vec![1.0]);
        assert_eq!(result.gaussian, vec![0.0]);
        assert_eq!(result.avg_abs_error, 0.0);
    }
}
