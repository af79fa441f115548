//! The M/D/n steady-state solver.

use num_complex::Complex64;
use qt_core::{errors::Result, Probability, Real, Size, Time};
use qt_math::PoissonDistribution;
use tracing::debug;

use super::linear_system::{check_probability, LinearSystem};
use super::probability::ProbabilityVector;
use super::roots::spectral_roots;
use super::tail::{balance_residuals, extend_tail};
use super::weights::arrival_weights;
use crate::parameters::QueueParameters;

/// Steady-state solver for an M/D/n queue.
///
/// Holds only its parameters: every call to [`solve`](Self::solve) recomputes
/// the roots, weights and probabilities from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct MdnSolver {
    params: QueueParameters,
}

/// Everything computed by one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct MdnSolution {
    params: QueueParameters,
    roots: Vec<Complex64>,
    weights: Vec<Real>,
    probabilities: ProbabilityVector,
    residual: Real,
    rank: Size,
}

impl MdnSolver {
    /// Create a solver, re-validating `params`.
    pub fn new(params: QueueParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters this solver was built with.
    pub fn parameters(&self) -> &QueueParameters {
        &self.params
    }

    /// Compute the state probabilities.
    ///
    /// The returned vector has the configured length; if the tail recursion
    /// hit the stability boundary the trailing entries are zero.
    ///
    /// # Errors
    ///
    /// [`Error::RootFindingDivergence`] when a root does not converge within
    /// the iteration bound. [`Error::LinearSystemUnsolvable`] when the
    /// boundary system cannot be trusted: residual above tolerance, numerical
    /// rank below `n` (this happens for many channels at high load, e.g.
    /// `n = 20`, `ρ = 0.9`), or `p_0 … p_n` outside `[0, 1]`.
    ///
    /// [`Error::RootFindingDivergence`]: qt_core::Error::RootFindingDivergence
    /// [`Error::LinearSystemUnsolvable`]: qt_core::Error::LinearSystemUnsolvable
    pub fn solve(&self) -> Result<ProbabilityVector> {
        self.solve_detailed().map(MdnSolution::into_probabilities)
    }

    /// Compute the state probabilities together with the intermediate
    /// roots, weights and least-squares diagnostics.
    pub fn solve_detailed(&self) -> Result<MdnSolution> {
        let params = &self.params;
        debug!(
            arrival_rate = params.arrival_rate(),
            service_time = params.service_time(),
            channels = params.channels(),
            length = params.length(),
            "solving M/D/n queue"
        );

        let roots = spectral_roots(params)?;
        let boundary = LinearSystem::build(params, &roots)?.solve(params.residual_tolerance())?;
        let weights = arrival_weights(params);
        let probabilities = extend_tail(&boundary.probabilities, &weights, params.length())?;
        // p_n follows from the boundary values without a negativity stop
        let n = params.channels();
        check_probability(n, probabilities[n], boundary.rank, boundary.residual)?;

        debug!(
            filled = probabilities.filled_len(),
            residual = boundary.residual,
            "M/D/n solve finished"
        );

        Ok(MdnSolution {
            params: *params,
            roots,
            weights,
            probabilities,
            residual: boundary.residual,
            rank: boundary.rank,
        })
    }
}

impl MdnSolution {
    /// The parameters that produced this solution.
    pub fn parameters(&self) -> &QueueParameters {
        &self.params
    }

    /// Spectral roots, ordered by harmonic index.
    pub fn roots(&self) -> &[Complex64] {
        &self.roots
    }

    /// Poisson arrival weights `q_k`.
    pub fn weights(&self) -> &[Real] {
        &self.weights
    }

    /// State probabilities.
    pub fn probabilities(&self) -> &ProbabilityVector {
        &self.probabilities
    }

    /// Consume and return the state probabilities.
    pub fn into_probabilities(self) -> ProbabilityVector {
        self.probabilities
    }

    /// Least-squares residual of the boundary system.
    pub fn residual(&self) -> Real {
        self.residual
    }

    /// Numerical rank of the boundary system.
    pub fn rank(&self) -> Size {
        self.rank
    }

    /// Balance-equation residuals of the recursively filled entries; see
    /// [`balance_residuals`].
    pub fn balance_residuals(&self) -> Vec<Real> {
        balance_residuals(&self.probabilities, &self.weights, self.params.channels())
    }

    // ── Performance measures (over the computed prefix) ──────────────────────

    /// Mean number of jobs in the system.
    pub fn mean_jobs(&self) -> Real {
        self.probabilities.mean()
    }

    /// Mean number of jobs waiting for a channel, `Σ_{k>n} (k − n)·p_k`.
    pub fn mean_queue_length(&self) -> Real {
        let n = self.params.channels();
        self.probabilities
            .filled()
            .iter()
            .enumerate()
            .skip(n + 1)
            .map(|(k, p)| (k - n) as Real * p)
            .sum()
    }

    /// Mean number of busy channels, `Σ min(k, n)·p_k`; close to `λb`.
    pub fn mean_busy_channels(&self) -> Real {
        let n = self.params.channels();
        self.probabilities
            .filled()
            .iter()
            .enumerate()
            .map(|(k, p)| k.min(n) as Real * p)
            .sum()
    }

    /// Probability that an arriving job finds all channels busy.
    pub fn waiting_probability(&self) -> Probability {
        let n = self.params.channels();
        1.0 - self.probabilities.filled()[..n].iter().sum::<Real>()
    }

    /// Mean waiting time before service, by Little's law.
    pub fn mean_waiting_time(&self) -> Time {
        self.mean_queue_length() / self.params.arrival_rate()
    }

    /// Mean time in the system (waiting plus service).
    pub fn mean_sojourn_time(&self) -> Time {
        self.mean_waiting_time() + self.params.service_time()
    }

    /// Poisson arrival mass beyond the last weight, `P(X ≥ length)`.
    pub fn arrival_tail_mass(&self) -> Result<Probability> {
        let dist = PoissonDistribution::new(self.params.offered_load())?;
        Ok(dist.tail_mass(self.weights.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn solve(l: Real, b: Real, n: Size) -> MdnSolution {
        MdnSolver::new(QueueParameters::new(l, b, n).unwrap())
            .unwrap()
            .solve_detailed()
            .unwrap()
    }

    #[test]
    fn single_channel_matches_pollaczek_khinchine() {
        // M/D/1, ρ = 0.5: L_q = ρ² / (2(1 − ρ)) = 0.25
        let s = solve(0.5, 1.0, 1);
        assert!(s.roots().is_empty());
        assert_abs_diff_eq!(s.probabilities()[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.mean_queue_length(), 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(s.mean_jobs(), 0.75, epsilon = 1e-9);
        assert_abs_diff_eq!(s.mean_waiting_time(), 0.5, epsilon = 1e-8);
        assert_abs_diff_eq!(s.mean_sojourn_time(), 1.5, epsilon = 1e-8);
        assert_abs_diff_eq!(s.waiting_probability(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn two_channel_measures() {
        let s = solve(1.0, 1.6, 2);
        assert_eq!(s.roots().len(), 1);
        assert_eq!(s.weights().len(), 100);
        assert!(s.residual() < 1e-12);
        assert_eq!(s.rank(), 2);
        assert_abs_diff_eq!(s.waiting_probability(), 0.701_898_317, epsilon = 1e-6);
        assert_abs_diff_eq!(s.mean_busy_channels(), 1.6, epsilon = 5e-3);
        // the noisy end of the tail moves these by up to ~1e-2
        assert_abs_diff_eq!(s.mean_queue_length(), 1.445_767, epsilon = 2e-2);
        assert_abs_diff_eq!(s.mean_jobs(), 3.045_842, epsilon = 2e-2);
    }

    #[test]
    fn solve_returns_the_detailed_probabilities() {
        let solver = MdnSolver::new(QueueParameters::new(2.0, 1.5, 4).unwrap()).unwrap();
        assert_eq!(
            solver.solve().unwrap(),
            solver.solve_detailed().unwrap().into_probabilities()
        );
    }

    #[test]
    fn arrival_tail_mass_complements_weights() {
        let s = solve(1.0, 1.6, 2);
        let covered: Real = s.weights().iter().sum();
        let tail = s.arrival_tail_mass().unwrap();
        assert!(tail >= 0.0 && tail < 1e-12);
        assert_abs_diff_eq!(covered + tail, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn balance_residuals_are_small() {
        let s = solve(1.0, 2.4, 3);
        assert!(!s.balance_residuals().is_empty());
        assert!(s.balance_residuals().iter().all(|&r| r < 1e-12));
    }
}
