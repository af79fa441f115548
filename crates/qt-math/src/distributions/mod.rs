//! Probability distributions.
//!
//! Only the Poisson law is needed by the queueing models; the pmf/cdf
//! delegate to the `statrs` crate, while the weight sequence used by the
//! recursions is produced by the multiplicative recurrence.

pub mod poisson;

pub use poisson::{poisson_weights, PoissonDistribution};
