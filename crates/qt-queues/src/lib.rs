//! # qt-queues
//!
//! Steady-state queueing models.
//!
//! Currently provides the M/D/n queue (Poisson arrivals, deterministic
//! service, `n` identical channels) solved by the spectral method: roots of
//! the characteristic equation fix the first `n` state probabilities, and a
//! forward recursion over the Poisson arrival weights extends them into the
//! tail.
//!
//! ```
//! use qt_queues::{MdnSolver, QueueParameters};
//!
//! let params = QueueParameters::new(0.5, 1.0, 1).unwrap();
//! let p = MdnSolver::new(params).unwrap().solve().unwrap();
//! // M/D/1: the idle probability is 1 − ρ.
//! assert!((p[0] - 0.5).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Queue parameters and their builder.
pub mod parameters;

/// The M/D/n spectral solver.
pub mod md_n;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use md_n::{MdnSolution, MdnSolver, ProbabilityVector, TailTermination};
pub use parameters::{QueueParameters, QueueParametersBuilder};
pub use qt_math::ConvergenceCriterion;
