//! Poisson distribution and Poisson weight sequences.
//!
//! The weight sequence `q_k = e^{-μ} μ^k / k!` is what the queueing
//! recursions consume: it is the probability of exactly `k` arrivals during a
//! window whose expected arrival count is `μ`.

use qt_core::{ensure, errors::Result, Real, Size};
use statrs::distribution::{Discrete, DiscreteCDF, Poisson};

/// First `len` Poisson probability masses for mean `mean`.
///
/// Uses the recurrence `q_0 = e^{-μ}`, `q_k = q_{k-1} · μ / k`.  Entries may
/// underflow to zero for large `k`; that is a legitimate negligible weight.
pub fn poisson_weights(mean: Real, len: Size) -> Vec<Real> {
    let mut weights = Vec::with_capacity(len);
    let mut q = (-mean).exp();
    for k in 0..len {
        if k > 0 {
            q *= mean / k as Real;
        }
        weights.push(q);
    }
    weights
}

/// Poisson distribution with mean `lambda`.
#[derive(Debug, Clone)]
pub struct PoissonDistribution {
    dist: Poisson,
    lambda: Real,
}

impl PoissonDistribution {
    /// Create a Poisson distribution with the given mean `lambda`.
    ///
    /// Fails with `InvalidParameters` unless `lambda` is finite and positive.
    pub fn new(lambda: Real) -> Result<Self> {
        ensure!(
            lambda.is_finite() && lambda > 0.0,
            "Poisson mean must be finite and positive, got {lambda}"
        );
        let dist = Poisson::new(lambda)
            .map_err(|e| qt_core::Error::InvalidParameters(e.to_string()))?;
        Ok(Self { dist, lambda })
    }

    /// Probability mass function P(X = k).
    pub fn pmf(&self, k: u64) -> Real {
        self.dist.pmf(k)
    }

    /// Cumulative distribution function P(X ≤ k).
    pub fn cdf(&self, k: u64) -> Real {
        self.dist.cdf(k)
    }

    /// The first `len` probability masses, via [`poisson_weights`].
    pub fn weights(&self, len: Size) -> Vec<Real> {
        poisson_weights(self.lambda, len)
    }

    /// Probability mass not covered by the first `len` weights,
    /// i.e. P(X ≥ len).
    pub fn tail_mass(&self, len: Size) -> Real {
        if len == 0 {
            return 1.0;
        }
        (1.0 - self.cdf(len as u64 - 1)).max(0.0)
    }
}
