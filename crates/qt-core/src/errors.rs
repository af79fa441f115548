//! Error types for queueing-rs.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is the single `thiserror`-derived [`Error`] enum below.  Parameter
//! checks go through the [`ensure!`](crate::ensure) macro, unrecoverable
//! internal conditions through [`fail!`](crate::fail).

use thiserror::Error;

/// The top-level error type used throughout queueing-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Model parameters rejected at construction time.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A generic fixed-point iteration ran out of iterations.
    #[error("fixed-point iteration did not converge after {iterations} iterations (last step {last_step:e})")]
    NotConverged {
        /// Number of iterations performed.
        iterations: usize,
        /// Magnitude of the final step.
        last_step: f64,
    },

    /// The spectral root for a given harmonic index did not converge.
    #[error("root for harmonic {harmonic} did not converge within {iterations} iterations")]
    RootFindingDivergence {
        /// Harmonic index `m` (1-based).
        harmonic: usize,
        /// Iteration bound that was exhausted.
        iterations: usize,
    },

    /// The boundary system has no trustworthy solution: the residual is too
    /// large, the matrix is numerically rank deficient, or the solution is
    /// not a probability.
    #[error("linear system unsolvable: {reason} (rank {rank}, residual {residual:e})")]
    LinearSystemUnsolvable {
        /// What made the solution unusable.
        reason: String,
        /// Numerical rank of the system matrix.
        rank: usize,
        /// Euclidean norm of `A·x − b`.
        residual: f64,
    },

    /// Dimension mismatch or otherwise malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout queueing-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameters(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use qt_core::{ensure, errors::Error};
/// fn positive(x: f64) -> qt_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameters(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameters(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use qt_core::{fail, errors::Error};
/// fn always_err() -> qt_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
