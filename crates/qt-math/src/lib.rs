//! # qt-math
//!
//! Numerical building blocks for queueing-rs: Poisson weight sequences
//! (cross-checked against statrs), complex fixed-point iteration, and complex
//! linear least squares (over nalgebra's SVD).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Least-squares solution of complex linear systems.
pub mod linear_least_squares;

/// Iterative solvers.
pub mod solvers;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{poisson_weights, PoissonDistribution};
pub use linear_least_squares::ComplexLeastSquares;
pub use num_complex::Complex64;
pub use solvers::{fixed_point, ConvergenceCriterion, FixedPoint};
