// src/stats.rs
use serde::{Deserialize, Serialize};

/// Sample mean. Defined as 0.0 for an empty slice; callers that need to
/// distinguish "no data" from a genuinely zero mean should check the length
/// first.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator). 0.0 with fewer than two
/// samples.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Ordinary least-squares fit over paired observations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub correlation: f64,
}

/// OLS slope/intercept plus the Pearson correlation coefficient.
///
/// Fewer than two pairs, or a zero denominator (all x identical), yields the
/// all-zero result rather than an error; the UI treats that as "no fit".
pub fn linear_fit(pairs: &[(f64, f64)]) -> Regression {
    if pairs.len() < 2 {
        return Regression::default();
    }

    let n = pairs.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    let mut sum_y2 = 0.0;
    for &(x, y) in pairs {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let denom_x = n * sum_x2 - sum_x * sum_x;
    if denom_x == 0.0 {
        return Regression::default();
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom_x;
    let intercept = (sum_y - slope * sum_x) / n;

    let denom_y = n * sum_y2 - sum_y * sum_y;
    let correlation = if denom_y > 0.0 {
        (n * sum_xy - sum_x * sum_y) / (denom_x * denom_y).sqrt()
    } else {
        0.0
    };

    Regression {
        slope,
        intercept,
        correlation,
    }
}
