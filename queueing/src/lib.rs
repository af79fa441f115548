//! # queueing
//!
//! Numerical steady-state solvers for queueing-theory models.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `qt-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use queueing::queues::{MdnSolver, QueueParameters};
//!
//! // λ = 1, ρ = 0.8, two channels
//! let params = QueueParameters::from_utilization(1.0, 0.8, 2)?;
//! let p = MdnSolver::new(params)?.solve()?;
//! assert!(p[0] > 0.1 && p[0] < 0.3);
//! # Ok::<(), queueing::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use qt_core as core;

/// Numerical building blocks: Poisson weights, fixed points, least squares.
pub use qt_math as math;

/// Queueing models.
pub use qt_queues as queues;
