//! Poisson arrival weights for one service interval.

use qt_core::Real;
use qt_math::poisson_weights;

use crate::parameters::QueueParameters;

/// `q_k`, the probability of exactly `k` arrivals during one service time,
/// for `k = 0..length`.
pub fn arrival_weights(params: &QueueParameters) -> Vec<Real> {
    poisson_weights(params.offered_load(), params.length())
}
