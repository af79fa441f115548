//! The M/D/n queue: Poisson arrivals, deterministic service time `b`, `n`
//! identical channels.
//!
//! Observed at the ends of successive service intervals, the number of jobs
//! in the system is a Markov chain whose transitions are driven by the
//! Poisson weights
//!
//! ```text
//! q_k = e^{-λb} (λb)^k / k!
//! ```
//!
//! and whose stationary distribution satisfies the balance equations
//!
//! ```text
//! p_k = q_k · Σ_{i=0}^{n} p_i + Σ_{i=n+1}^{k+n} p_i · q_{k+n−i}.
//! ```
//!
//! The solution proceeds in four steps:
//!
//! 1. [`roots`] — the ⌊n/2⌋ roots of `z^n = e^{λb(z−1)}` inside the unit
//!    disc, by fixed-point iteration per harmonic `m`;
//! 2. [`linear_system`] — the first `n` probabilities, from the requirement
//!    that the generating function vanishes at those roots plus the
//!    mean-utilization constraint, solved by least squares;
//! 3. [`weights`] — the Poisson weights `q_k`;
//! 4. [`tail`] — the balance equations rearranged into a forward recursion
//!    for `p_n, p_{n+1}, …`, which stops as soon as rounding noise would
//!    produce a negative probability.

pub mod linear_system;
pub mod probability;
pub mod roots;
pub mod solver;
pub mod tail;
pub mod weights;

pub use linear_system::{BoundarySolution, LinearSystem, PROBABILITY_SLACK};
pub use probability::{ProbabilityVector, TailTermination};
pub use roots::{root_count, spectral_roots};
pub use solver::{MdnSolution, MdnSolver};
pub use tail::{balance_residuals, extend_tail};
pub use weights::arrival_weights;
