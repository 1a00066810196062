// src/histogram.rs
use serde::{Deserialize, Serialize};

/// Whether a histogram reports raw frequency counts or frequencies
/// normalized by sample size. The theoretical overlay is scaled to match:
/// counts-scale multiplies the density/mass by the sample size (and bin
/// width for continuous data), probability-scale reports it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistogramScale {
    Counts,
    Probability,
}

/// Binned view of a continuous sample over [0, max], with the theoretical
/// curve evaluated at each bin midpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousHistogram {
    pub bin_width: f64,
    pub midpoints: Vec<f64>,
    pub empirical: Vec<f64>,
    pub theoretical: Vec<f64>,
}

/// Per-integer-count view of a discrete sample, one bin per value 0..=max,
/// with the theoretical mass evaluated at each k.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscreteHistogram {
    pub labels: Vec<u32>,
    pub empirical: Vec<f64>,
    pub theoretical: Vec<f64>,
}

/// Bin a continuous sample into `min(ceil(sqrt(n)), max_bins)` bins spanning
/// [0, max(sample)]. Bin boundaries are recomputed from the current sample
/// every call, so the binning follows the data as it evolves. Returns `None`
/// for an empty sample or a zero range.
pub fn continuous_histogram(
    data: &[f64],
    max_bins: usize,
    scale: HistogramScale,
    pdf: impl Fn(f64) -> f64,
) -> Option<ContinuousHistogram> {
    if data.is_empty() {
        return None;
    }
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return None;
    }

    let n = data.len();
    let bins = ((n as f64).sqrt().ceil() as usize).min(max_bins).max(1);
    let bin_width = max / bins as f64;

    let mut counts = vec![0usize; bins];
    for &t in data {
        let index = ((t / bin_width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    let midpoints: Vec<f64> = (0..bins).map(|i| (i as f64 + 0.5) * bin_width).collect();
    let empirical: Vec<f64> = match scale {
        HistogramScale::Counts => counts.iter().map(|&c| c as f64).collect(),
        HistogramScale::Probability => counts.iter().map(|&c| c as f64 / n as f64).collect(),
    };
    let theoretical: Vec<f64> = midpoints
        .iter()
        .map(|&x| match scale {
            HistogramScale::Counts => pdf(x) * n as f64 * bin_width,
            HistogramScale::Probability => pdf(x) * bin_width,
        })
        .collect();

    Some(ContinuousHistogram {
        bin_width,
        midpoints,
        empirical,
        theoretical,
    })
}

/// Frequency table for integer count data, one bin per value from 0 up to
/// the sample maximum (or `span_to`, whichever is larger, so that two
/// emitters can share one axis). Returns `None` for an empty sample.
pub fn discrete_histogram(
    counts: &[u32],
    span_to: Option<u32>,
    scale: HistogramScale,
    mut pmf: impl FnMut(u32) -> f64,
) -> Option<DiscreteHistogram> {
    if counts.is_empty() {
        return None;
    }
    let sample_max = counts.iter().copied().max().unwrap_or(0);
    let max = sample_max.max(span_to.unwrap_or(0));
    let n = counts.len();

    let mut frequency = vec![0usize; max as usize + 1];
    for &c in counts {
        frequency[c as usize] += 1;
    }

    let labels: Vec<u32> = (0..=max).collect();
    let empirical: Vec<f64> = match scale {
        HistogramScale::Counts => frequency.iter().map(|&c| c as f64).collect(),
        HistogramScale::Probability => frequency.iter().map(|&c| c as f64 / n as f64).collect(),
    };
    let theoretical: Vec<f64> = labels
        .iter()
        .map(|&k| match scale {
            HistogramScale::Counts => pmf(k) * n as f64,
            HistogramScale::Probability => pmf(k),
        })
        .collect();

    Some(DiscreteHistogram {
        labels,
        empirical,
        theoretical,
    })
}
