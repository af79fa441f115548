//! Fixed-point iteration in the complex plane.
//!
//! Repeats `z ← f(z)` from a seed until successive iterates agree to within
//! the requested accuracy, or the iteration bound is exhausted.

use num_complex::Complex64;
use qt_core::{
    errors::{Error, Result},
    Real, Size,
};

/// Iteration bound used when the caller has no better estimate.
pub const DEFAULT_MAX_ITERATIONS: Size = 100_000;

/// Which components of successive iterates must agree for convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvergenceCriterion {
    /// Only `|Re(z_{k+1}) − Re(z_k)|` is tested.
    #[default]
    RealPart,
    /// Both the real and the imaginary differences are tested.
    Both,
}

impl ConvergenceCriterion {
    /// Return `true` if `previous → next` is a converged step.
    #[inline]
    pub fn is_satisfied(self, previous: Complex64, next: Complex64, accuracy: Real) -> bool {
        let re = (next.re - previous.re).abs() < accuracy;
        match self {
            Self::RealPart => re,
            Self::Both => re && (next.im - previous.im).abs() < accuracy,
        }
    }
}

/// Outcome of a converged fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPoint {
    /// The final iterate.
    pub value: Complex64,
    /// Number of applications of `f`.
    pub iterations: Size,
    /// Modulus of the last step `|z_{k+1} − z_k|`.
    pub last_step: Real,
}

/// Iterate `z ← f(z)` starting from `seed`.
///
/// Stops as soon as `criterion` reports two successive iterates closer than
/// `accuracy`.  Returns [`Error::NotConverged`] if `max_iterations` is
/// exhausted or an iterate stops being finite.
pub fn fixed_point<F>(
    f: F,
    seed: Complex64,
    accuracy: Real,
    max_iterations: Size,
    criterion: ConvergenceCriterion,
) -> Result<FixedPoint>
where
    F: Fn(Complex64) -> Complex64,
{
    if accuracy.is_nan() || accuracy <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "fixed-point accuracy must be positive, got {accuracy}"
        )));
    }
    if max_iterations == 0 {
        return Err(Error::InvalidArgument(
            "fixed-point iteration bound must be at least 1".into(),
        ));
    }

    let mut current = seed;
    let mut last_step = Real::INFINITY;
    for iteration in 1..=max_iterations {
        let next = f(current);
        if !(next.re.is_finite() && next.im.is_finite()) {
            return Err(Error::NotConverged {
                iterations: iteration,
                last_step: Real::NAN,
            });
        }
        last_step = (next - current).norm();
        if criterion.is_satisfied(current, next, accuracy) {
            return Ok(FixedPoint {
                value: next,
                iterations: iteration,
                last_step,
            });
        }
        current = next;
    }
    Err(Error::NotConverged {
        iterations: max_iterations,
        last_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cosine_fixed_point() {
        // Dottie number: cos(x) = x
        let r = fixed_point(
            |z: Complex64| z.cos(),
            Complex64::new(1.0, 0.0),
            1e-14,
            1_000,
            ConvergenceCriterion::Both,
        )
        .unwrap();
        assert_abs_diff_eq!(r.value.re, 0.739_085_133_215_160_6, epsilon = 1e-12);
        assert_abs_diff_eq!(r.value.im, 0.0, epsilon = 1e-15);
        assert!(r.iterations > 1);
    }

    #[test]
    fn contraction_towards_complex_point() {
        // z ← (z + c) / 2 has the unique fixed point c.
        let c = Complex64::new(0.25, -0.75);
        let r = fixed_point(
            |z| (z + c) * 0.5,
            Complex64::new(0.0, 0.0),
            1e-13,
            200,
            ConvergenceCriterion::Both,
        )
        .unwrap();
        assert!((r.value - c).norm() < 1e-12);
    }

    #[test]
    fn real_part_criterion_ignores_imaginary_drift() {
        // Real part is fixed from the first step, imaginary part keeps moving.
        let r = fixed_point(
            |z: Complex64| Complex64::new(1.0, z.im + 1.0),
            Complex64::new(1.0, 0.0),
            1e-12,
            10,
            ConvergenceCriterion::RealPart,
        )
        .unwrap();
        assert_eq!(r.iterations, 1);

        let err = fixed_point(
            |z: Complex64| Complex64::new(1.0, z.im + 1.0),
            Complex64::new(1.0, 0.0),
            1e-12,
            10,
            ConvergenceCriterion::Both,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotConverged { iterations: 10, .. }));
    }

    #[test]
    fn divergent_map_is_reported() {
        let err = fixed_point(
            |z| z * 2.0 + 1.0,
            Complex64::new(1.0, 0.0),
            1e-12,
            5_000,
            ConvergenceCriterion::RealPart,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotConverged { .. }));
    }

    #[test]
    fn rejects_bad_settings() {
        let id = |z: Complex64| z;
        let seed = Complex64::new(0.0, 0.0);
        assert!(fixed_point(id, seed, 0.0, 10, ConvergenceCriterion::RealPart).is_err());
        assert!(fixed_point(id, seed, 1e-12, 0, ConvergenceCriterion::RealPart).is_err());
    }
}
