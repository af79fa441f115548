//! Least-squares solution of complex linear systems.
//!
//! Solves `A·x ≈ b` in the minimum-norm least-squares sense through the SVD
//! `A = U Σ Vᴴ`:
//!
//! ```text
//! x = V Σ⁺ Uᴴ b
//! ```
//!
//! Singular values at or below `rcond · σ_max` are treated as zero, so
//! rank-deficient and nearly singular systems still yield a solution.  The
//! residual norm and the numerical rank are reported alongside it so callers
//! can judge the conditioning themselves.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use qt_core::{
    errors::{Error, Result},
    fail, Real, Size,
};

/// Relative singular-value cutoff used when none is supplied.
pub const DEFAULT_RCOND: Real = 1e-8;

/// Minimum-norm least-squares solution of a complex linear system.
#[derive(Debug, Clone)]
pub struct ComplexLeastSquares {
    solution: DVector<Complex64>,
    singular_values: Vec<Real>,
    residual: Real,
    rank: Size,
}

impl ComplexLeastSquares {
    /// Solve `a · x ≈ b`.
    ///
    /// * `a` — the *m × k* system matrix (any shape, not necessarily square).
    /// * `b` — right-hand side of length *m*.
    /// * `rcond` — relative cutoff for small singular values; a non-positive
    ///   value selects `max(m, k) · ε · σ_max`.
    pub fn solve(a: &DMatrix<Complex64>, b: &DVector<Complex64>, rcond: Real) -> Result<Self> {
        let rows = a.nrows();
        let cols = a.ncols();
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidArgument("system matrix is empty".into()));
        }
        if b.len() != rows {
            return Err(Error::InvalidArgument(format!(
                "right-hand side has length {}, expected {rows}",
                b.len()
            )));
        }

        let Some(svd) = a.clone().try_svd(true, true, f64::EPSILON, 0) else {
            fail!("SVD of the {rows}×{cols} system did not converge");
        };
        let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
            fail!("SVD factors U and Vᴴ were not computed");
        };
        let sv = &svd.singular_values;

        let sv_max = sv.iter().copied().fold(0.0_f64, f64::max);
        let threshold = if rcond > 0.0 {
            rcond * sv_max
        } else {
            rows.max(cols) as Real * f64::EPSILON * sv_max
        };

        // w = Σ⁺ Uᴴ b, keeping only the significant singular directions
        let ut_b = u.adjoint() * b;
        let mut rank = 0;
        let w = DVector::from_iterator(
            sv.len(),
            sv.iter().zip(ut_b.iter()).map(|(&s, &c)| {
                if s > threshold {
                    rank += 1;
                    c / s
                } else {
                    Complex64::new(0.0, 0.0)
                }
            }),
        );
        let solution = v_t.adjoint() * w;
        let residual = (a * &solution - b).norm();

        Ok(Self {
            solution,
            singular_values: sv.iter().copied().collect(),
            residual,
            rank,
        })
    }

    /// The least-squares solution `x`.
    pub fn solution(&self) -> &DVector<Complex64> {
        &self.solution
    }

    /// Consume and return the solution vector.
    pub fn into_solution(self) -> DVector<Complex64> {
        self.solution
    }

    /// Euclidean norm of the residual `A·x − b`.
    pub fn residual(&self) -> Real {
        self.residual
    }

    /// Number of singular values above the cutoff.
    pub fn rank(&self) -> Size {
        self.rank
    }

    /// Singular values of `A` in the order nalgebra returns them.
    pub fn singular_values(&self) -> &[Real] {
        &self.singular_values
    }
}
