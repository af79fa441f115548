//! Iterative solvers.

pub mod fixed_point;

pub use fixed_point::{fixed_point, ConvergenceCriterion, FixedPoint, DEFAULT_MAX_ITERATIONS};
