// src/sampling.rs
use rand::prelude::*;

/// Source of exponential and Poisson variates over a shared uniform(0,1)
/// stream. Seedable for reproducible runs, entropy-seeded otherwise.
#[derive(Debug)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        Self { rng }
    }

    /// Inverse-CDF exponential draw: -ln(1 - U) / rate.
    ///
    /// A non-positive rate has no finite inter-arrival time; the INFINITY
    /// sentinel means "no event ever", and callers must not treat it as a
    /// usable duration.
    pub fn exponential(&mut self, rate: f64) -> f64 {
        if rate <= 0.0 {
            return f64::INFINITY;
        }
        let u: f64 = self.rng.gen();
        -(1.0 - u).ln() / rate
    }

    /// Poisson draw via Knuth's multiplication method: multiply uniform
    /// draws into a running product until it falls below e^(-rate).
    ///
    /// Returns 0 for rate <= 0 without entering the loop; the threshold
    /// would be >= 1 there and the loop would never terminate.
    pub fn poisson(&mut self, rate: f64) -> u32 {
        if rate <= 0.0 {
            return 0;
        }
        let threshold = (-rate).exp();
        let mut product: f64 = 1.0;
        let mut k: u32 = 0;
        loop {
            k += 1;
            product *= self.rng.gen::<f64>();
            if product <= threshold {
                break;
            }
        }
        k - 1
    }
}
