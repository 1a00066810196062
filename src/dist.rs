// src/dist.rs
use statrs::distribution::{Continuous, Normal};

/// Exponential density rate * e^(-rate * x) for x >= 0, zero elsewhere.
pub fn exponential_pdf(x: f64, rate: f64) -> f64 {
    if x < 0.0 || rate <= 0.0 {
        return 0.0;
    }
    rate * (-rate * x).exp()
}

/// Gaussian density with the given mean and variance. Zero for a
/// non-positive variance.
pub fn gaussian_pdf(x: f64, mean: f64, variance: f64) -> f64 {
    if variance <= 0.0 {
        return 0.0;
    }
    Normal::new(mean, variance.sqrt())
        .map(|n| n.pdf(x))
        .unwrap_or(0.0)
}

/// Monotonically growing factorial table. Values are computed once and
/// reused; requesting a larger k extends the table upward from the last
/// cached entry.
#[derive(Debug, Clone)]
pub struct FactorialCache {
    values: Vec<f64>,
}

impl FactorialCache {
    pub fn new() -> Self {
        Self { values: vec![1.0] }
    }

    pub fn factorial(&mut self, k: usize) -> f64 {
        if k < self.values.len() {
            return self.values[k];
        }
        let mut last = *self.values.last().unwrap_or(&1.0);
        for i in self.values.len()..=k {
            last *= i as f64;
            self.values.push(last);
        }
        self.values[k]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for FactorialCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Poisson mass function evaluator backed by a [`FactorialCache`].
#[derive(Debug, Clone, Default)]
pub struct PoissonPmf {
    cache: FactorialCache,
}

impl PoissonPmf {
    pub fn new() -> Self {
        Self::default()
    }

    /// P(X = k) = e^(-rate) * rate^k / k!
    pub fn eval(&mut self, rate: f64, k: u32) -> f64 {
        let value = (-rate).exp() * rate.powi(k as i32) / self.cache.factorial(k as usize);
        // rate^k and k! both overflow f64 near k ~ 170; the mass out there
        // is zero for any demo-scale rate.
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// Binomial mass function P(X = k) for k = 0..=k_max, via the stable
/// multiplicative recurrence
///
/// P(0) = (1 - p)^n,  P(k+1) = P(k) * (n - k)/(k + 1) * p/(1 - p)
///
/// which avoids evaluating large factorials directly. For p >= 1 the
/// distribution degenerates to a point mass at k = n.
pub fn binomial_pmf(n: u32, p: f64, k_max: u32) -> Vec<f64> {
    if p >= 1.0 {
        return (0..=k_max).map(|k| if k == n { 1.0 } else { 0.0 }).collect();
    }

    let mut pmf = Vec::with_capacity(k_max as usize + 1);
    let mut pk = (1.0 - p).powi(n as i32);
    pmf.push(pk);
    for k in 0..k_max {
        let multiplier = (n as f64 - k as f64) / (k as f64 + 1.0) * (p / (1.0 - p));
        pk *= multiplier;
        pmf.push(pk);
    }
    pmf
}
