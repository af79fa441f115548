//! Forward recursion for the tail probabilities `p_n, p_{n+1}, …`.
//!
//! With `S = Σ_{j<n} p_j`, the balance equation for state 0 gives
//! `p_n = p_0 / q_0 − S`.  Writing `U = S + p_n`, the balance equation for
//! state `k − n` solved for its highest-index term gives
//!
//! ```text
//! p_k = (p_{k−n} − U·q_{k−n} − Σ_{j=1}^{k−n−1} q_j · p_{k−j}) / q_0.
//! ```
//!
//! The recursion subtracts nearly equal quantities, so rounding error grows
//! geometrically along the tail.  The first negative value marks the point
//! where that noise dominates the (by then negligible) true mass; the
//! recursion stops there and leaves the remaining entries at zero.

use qt_core::{
    errors::{Error, Result},
    Real, Size,
};
use tracing::debug;

use super::probability::{ProbabilityVector, TailTermination};

/// Extend the boundary probabilities `head = [p_0, …, p_{n−1}]` to a vector
/// of `length` entries using the Poisson weights `weights`.
///
/// Requires `length > n` and at least `length − n` weights with a non-zero
/// `q_0`.
pub fn extend_tail(head: &[Real], weights: &[Real], length: Size) -> Result<ProbabilityVector> {
    let n = head.len();
    if n == 0 {
        return Err(Error::InvalidArgument(
            "at least one boundary probability is required".into(),
        ));
    }
    if length <= n {
        return Err(Error::InvalidArgument(format!(
            "vector length {length} must exceed the channel count {n}"
        )));
    }
    if weights.len() + n < length {
        return Err(Error::InvalidArgument(format!(
            "{} Poisson weights are too few for length {length}",
            weights.len()
        )));
    }
    let q0 = weights[0];
    if q0 <= 0.0 {
        return Err(Error::InvalidArgument(
            "leading Poisson weight underflowed to zero".into(),
        ));
    }

    let mut p = vec![0.0; length];
    p[..n].copy_from_slice(head);

    let s: Real = head.iter().sum();
    p[n] = p[0] / q0 - s;
    let u = s + p[n];

    let mut termination = TailTermination::Completed;
    for k in n + 1..length {
        let convolution: Real = (1..k - n).map(|j| weights[j] * p[k - j]).sum();
        let value = (p[k - n] - u * weights[k - n] - convolution) / q0;
        if value < 0.0 {
            debug!(index = k, value, "tail recursion reached the stability boundary");
            termination = TailTermination::StabilityBoundary { index: k };
            break;
        }
        p[k] = value;
    }

    Ok(ProbabilityVector::new(p, termination))
}

/// Residuals of the balance equations behind each recursively filled entry.
///
/// Entry `i` of the result belongs to state `k = n + 1 + i` and is
///
/// ```text
/// | p_{k−n} − U·q_{k−n} − Σ_{i=n+1}^{k} p_i · q_{k−i} |,
/// ```
///
/// evaluated in the forward (unsolved) form.  Only the filled prefix of `p`
/// is checked.
pub fn balance_residuals(p: &ProbabilityVector, weights: &[Real], channels: Size) -> Vec<Real> {
    let n = channels;
    let filled = p.filled();
    if n == 0 || filled.len() <= n + 1 {
        return Vec::new();
    }
    let u: Real = filled[..=n].iter().sum();

    (n + 1..filled.len().min(weights.len() + n))
        .map(|k| {
            let arrivals: Real = (n + 1..=k).map(|i| filled[i] * weights[k - i]).sum();
            (filled[k - n] - u * weights[k - n] - arrivals).abs()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qt_math::poisson_weights;

    #[test]
    fn single_channel_closed_form_head() {
        // M/D/1 with ρ = 0.5: p_0 = 1 − ρ, p_1 = (1 − ρ)(e^ρ − 1)
        let q = poisson_weights(0.5, 100);
        let p = extend_tail(&[0.5], &q, 100).unwrap();
        assert_abs_diff_eq!(p[1], 0.5 * (0.5_f64.exp() - 1.0), epsilon = 1e-14);
        assert_abs_diff_eq!(p[2], 0.122_599_961_204_426_55, epsilon = 1e-12);
        assert_eq!(p.termination(), TailTermination::Completed);
        assert_abs_diff_eq!(p.total_mass(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn negative_value_stops_recursion() {
        // M/D/2 with λb = 1.6: rounding noise turns the tail negative after a
        // couple of dozen states.
        let q = poisson_weights(1.6, 100);
        let head = [0.101_898_317_173_341_68, 0.196_203_365_653_316_53];
        let p = extend_tail(&head, &q, 100).unwrap();
        match p.termination() {
            TailTermination::StabilityBoundary { index } => {
                assert!((15..=35).contains(&index), "stopped at {index}");
                assert!(p.as_slice()[index..].iter().all(|&x| x == 0.0));
                assert!(p.filled().iter().all(|&x| x >= 0.0));
            }
            TailTermination::Completed => panic!("expected an early stop"),
        }
    }

    #[test]
    fn balance_holds_before_termination() {
        let q = poisson_weights(1.6, 100);
        let head = [0.101_898_317_173_341_68, 0.196_203_365_653_316_53];
        let p = extend_tail(&head, &q, 100).unwrap();
        let residuals = balance_residuals(&p, &q, 2);
        assert_eq!(residuals.len(), p.filled_len() - 3);
        for r in residuals {
            assert!(r < 1e-12, "residual {r}");
        }
    }

    #[test]
    fn rejects_malformed_inputs() {
        let q = poisson_weights(1.0, 10);
        assert!(extend_tail(&[], &q, 10).is_err());
        assert!(extend_tail(&[0.5, 0.2], &q, 2).is_err());
        assert!(extend_tail(&[0.5], &q[..3], 10).is_err());
        assert!(extend_tail(&[0.5], &[0.0; 10], 10).is_err());
    }
}
