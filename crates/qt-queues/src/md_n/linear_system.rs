//! Boundary system for the first `n` state probabilities.
//!
//! Every spectral root `z` of the characteristic equation must also be a
//! root of the numerator of the generating function, which gives
//!
//! ```text
//! Σ_{j=0}^{n−1} p_j · (z^j − z^n) = 0.
//! ```
//!
//! The real and imaginary parts of this identity give two real rows per
//! root.  The last row is replaced by the mean-utilization constraint
//!
//! ```text
//! Σ_{j=0}^{n−1} (n − j) · p_j = n − λb,
//! ```
//!
//! which keeps the system determined for a single channel (no roots) and for
//! even `n`, where the last root is real and its imaginary row vanishes.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use qt_core::{
    errors::{Error, Result},
    Real, Size,
};
use qt_math::{linear_least_squares::DEFAULT_RCOND, ComplexLeastSquares};
use tracing::{debug, warn};

use super::roots::root_count;
use crate::parameters::QueueParameters;

/// Rounding slack when checking that a boundary probability lies in `[0, 1]`.
///
/// At light load the highest boundary states carry mass far below this and
/// may come out of the solve as tiny negatives.
pub const PROBABILITY_SLACK: Real = 1e-9;

/// The `n × n` complex system `A·p = B` for the boundary probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    matrix: DMatrix<Complex64>,
    rhs: DVector<Complex64>,
}

/// First `n` probabilities together with the quality of the solve.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySolution {
    /// `p_0, …, p_{n−1}`.
    pub probabilities: Vec<Real>,
    /// Euclidean norm of `A·p − B`.
    pub residual: Real,
    /// Numerical rank of `A`.
    pub rank: Size,
}

impl LinearSystem {
    /// Assemble the system from the spectral roots.
    ///
    /// `roots` must hold exactly ⌊n/2⌋ values, as returned by
    /// [`spectral_roots`](super::roots::spectral_roots).
    pub fn build(params: &QueueParameters, roots: &[Complex64]) -> Result<Self> {
        let n = params.channels();
        if roots.len() != root_count(n) {
            return Err(Error::InvalidArgument(format!(
                "expected {} roots for {n} channels, got {}",
                root_count(n),
                roots.len()
            )));
        }

        let mut matrix = DMatrix::<Complex64>::zeros(n, n);
        let mut rhs = DVector::<Complex64>::zeros(n);

        // rows [0, r): real parts, rows [r, 2r): imaginary parts
        let r = roots.len();
        for (i, &z) in roots.iter().enumerate() {
            let powers = powers_of(z, n);
            let z_n = powers[n];
            for j in 0..n {
                let delta = powers[j] - z_n;
                matrix[(i, j)] = Complex64::new(delta.re, 0.0);
                matrix[(r + i, j)] = Complex64::new(delta.im, 0.0);
            }
        }

        for j in 0..n {
            matrix[(n - 1, j)] = Complex64::new((n - j) as Real, 0.0);
        }
        rhs[n - 1] = Complex64::new(n as Real - params.offered_load(), 0.0);

        Ok(Self { matrix, rhs })
    }

    /// The system matrix `A`.
    pub fn matrix(&self) -> &DMatrix<Complex64> {
        &self.matrix
    }

    /// The right-hand side `B`.
    pub fn rhs(&self) -> &DVector<Complex64> {
        &self.rhs
    }

    /// Solve by least squares and keep the real parts.
    ///
    /// Fails with [`Error::LinearSystemUnsolvable`] when the residual exceeds
    /// `residual_tolerance`, when singular values fall below the
    /// least-squares cutoff (the minimum-norm solution then satisfies the
    /// equations without being the boundary distribution), or when a
    /// solved probability lies outside `[0, 1]`.
    pub fn solve(&self, residual_tolerance: Real) -> Result<BoundarySolution> {
        let n = self.matrix.ncols();
        let ls = ComplexLeastSquares::solve(&self.matrix, &self.rhs, DEFAULT_RCOND)?;
        let residual = ls.residual();
        let rank = ls.rank();
        debug!(rank, residual, size = n, "boundary system solved");

        if residual.is_nan() || residual > residual_tolerance {
            warn!(
                residual,
                threshold = residual_tolerance,
                "boundary system residual above threshold"
            );
            return Err(Error::LinearSystemUnsolvable {
                reason: format!("residual exceeds threshold {residual_tolerance:e}"),
                rank,
                residual,
            });
        }
        if rank < n {
            warn!(rank, size = n, "boundary system is numerically rank deficient");
            return Err(Error::LinearSystemUnsolvable {
                reason: format!("numerical rank {rank} below {n}"),
                rank,
                residual,
            });
        }

        let probabilities: Vec<Real> = ls.solution().iter().map(|p| p.re).collect();
        for (j, &p) in probabilities.iter().enumerate() {
            check_probability(j, p, rank, residual)?;
        }

        Ok(BoundarySolution {
            probabilities,
            residual,
            rank,
        })
    }
}

/// Rejects `value` as state probability `index` unless it lies in `[0, 1]`
/// up to [`PROBABILITY_SLACK`].
pub(crate) fn check_probability(
    index: Size,
    value: Real,
    rank: Size,
    residual: Real,
) -> Result<()> {
    if (-PROBABILITY_SLACK..=1.0 + PROBABILITY_SLACK).contains(&value) {
        return Ok(());
    }
    warn!(index, value, "boundary probability outside [0, 1]");
    Err(Error::LinearSystemUnsolvable {
        reason: format!("p[{index}] = {value:e} is not a probability"),
        rank,
        residual,
    })
}

/// `[1, z, z², …, z^n]`.
fn powers_of(z: Complex64, n: Size) -> Vec<Complex64> {
    std::iter::successors(Some(Complex64::new(1.0, 0.0)), |&w| Some(w * z))
        .take(n + 1)
        .collect()
}
