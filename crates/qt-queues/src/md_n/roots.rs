//! Spectral roots of the M/D/n characteristic equation.
//!
//! For each harmonic `m = 1..⌊n/2⌋` the root is the fixed point of
//!
//! ```text
//! z ← exp(2πi·m/n − λb·(1 − z)/n),
//! ```
//!
//! seeded at `0.5·exp(2πi·m/n)`.  Roots for `m > n/2` are the complex
//! conjugates of these and add no independent equations, so they are not
//! computed.

use std::f64::consts::PI;

use num_complex::Complex64;
use qt_core::{
    errors::{Error, Result},
    Real, Size,
};
use qt_math::fixed_point;
use tracing::debug;

use crate::parameters::QueueParameters;

/// Number of spectral roots used for `channels` channels, `⌊n/2⌋`.
#[inline]
pub fn root_count(channels: Size) -> Size {
    channels / 2
}

/// Compute the ⌊n/2⌋ spectral roots, ordered by harmonic index.
///
/// Returns an empty vector for a single channel without iterating.  Fails
/// with [`Error::RootFindingDivergence`] if a root does not settle within the
/// configured iteration bound.
pub fn spectral_roots(params: &QueueParameters) -> Result<Vec<Complex64>> {
    let n = params.channels();
    let scale = params.offered_load() / n as Real;

    (1..=root_count(n))
        .map(|m| -> Result<Complex64> {
            let angle = 2.0 * PI * m as Real / n as Real;
            let phase = Complex64::new(0.0, angle);
            let root = fixed_point(
                |z| (phase - (1.0 - z) * scale).exp(),
                Complex64::from_polar(0.5, angle),
                params.tolerance(),
                params.max_iterations(),
                params.convergence(),
            )
            .map_err(|e| match e {
                Error::NotConverged { iterations, .. } => Error::RootFindingDivergence {
                    harmonic: m,
                    iterations,
                },
                other => other,
            })?;
            debug!(
                harmonic = m,
                iterations = root.iterations,
                re = root.value.re,
                im = root.value.im,
                "spectral root converged"
            );
            Ok(root.value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qt_math::ConvergenceCriterion;

    fn params(l: Real, b: Real, n: Size) -> QueueParameters {
        QueueParameters::new(l, b, n).unwrap()
    }

    #[test]
    fn count_is_half_the_channels() {
        for n in 1..=9 {
            let p = params(1.0, 0.5 * n as Real, n);
            let z = spectral_roots(&p).unwrap();
            assert_eq!(z.len(), n / 2, "n = {n}");
        }
    }

    #[test]
    fn single_channel_has_no_roots() {
        assert!(spectral_roots(&params(0.5, 1.0, 1)).unwrap().is_empty());
    }

    #[test]
    fn two_channels_real_negative_root() {
        let z = spectral_roots(&params(1.0, 1.6, 2)).unwrap();
        assert_abs_diff_eq!(z[0].re, -0.341_824_025_302_782_55, epsilon = 1e-10);
        assert_abs_diff_eq!(z[0].im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn three_channels_complex_root() {
        let z = spectral_roots(&params(1.0, 2.4, 3)).unwrap();
        assert_abs_diff_eq!(z[0].re, -0.248_601_114_486_876_97, epsilon = 1e-10);
        assert_abs_diff_eq!(z[0].im, 0.271_727_838_216_307_64, epsilon = 1e-10);
    }

    #[test]
    fn roots_satisfy_characteristic_equation() {
        // z^n = exp(λb(z − 1)) for every root.
        let p = params(2.0, 1.5, 4);
        for z in spectral_roots(&p).unwrap() {
            let lhs = z.powu(4);
            let rhs = ((z - 1.0) * p.offered_load()).exp();
            assert!((lhs - rhs).norm() < 1e-9, "z = {z}");
            assert!(z.norm() < 1.0);
        }
    }

    #[test]
    fn both_criterion_agrees_with_real_part_criterion() {
        let re_only = spectral_roots(&params(1.0, 4.0, 5)).unwrap();
        let both = QueueParameters::builder(1.0, 4.0, 5)
            .convergence(ConvergenceCriterion::Both)
            .build()
            .unwrap();
        let both = spectral_roots(&both).unwrap();
        for (a, b) in re_only.iter().zip(&both) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn iteration_bound_is_enforced() {
        let p = QueueParameters::builder(1.0, 1.6, 2)
            .max_iterations(2)
            .build()
            .unwrap();
        assert_eq!(
            spectral_roots(&p),
            Err(Error::RootFindingDivergence {
                harmonic: 1,
                iterations: 2
            })
        );
    }
}
