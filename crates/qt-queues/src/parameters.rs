//! Queue parameters.
//!
//! [`QueueParameters`] describes an M/D/n queue together with the numerical
//! settings of its solver.  Values are validated once, when they are built,
//! and are immutable afterwards.
//!
//! ```
//! use qt_queues::{ConvergenceCriterion, QueueParameters};
//!
//! let params = QueueParameters::builder(1.0, 1.6, 2)
//!     .tolerance(1e-13)
//!     .length(60)
//!     .convergence(ConvergenceCriterion::Both)
//!     .build()
//!     .unwrap();
//! assert!((params.utilization() - 0.8).abs() < 1e-15);
//! ```

use qt_core::{ensure, errors::Result, Rate, Real, Size, Time};
use qt_math::ConvergenceCriterion;

/// Default convergence tolerance of the root finder.
pub const DEFAULT_TOLERANCE: Real = 1e-12;

/// Default length of the probability vector.
pub const DEFAULT_LENGTH: Size = 100;

/// Default iteration bound of the root finder.
pub const DEFAULT_MAX_ITERATIONS: Size = qt_math::solvers::DEFAULT_MAX_ITERATIONS;

/// Default bound on the least-squares residual of the boundary system.
pub const DEFAULT_RESIDUAL_TOLERANCE: Real = 1e-6;

/// Parameters of an M/D/n queue and of its numerical solution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueParameters {
    arrival_rate: Rate,
    service_time: Time,
    channels: Size,
    tolerance: Real,
    length: Size,
    max_iterations: Size,
    convergence: ConvergenceCriterion,
    residual_tolerance: Real,
}

impl QueueParameters {
    /// Parameters with default numerical settings.
    ///
    /// * `arrival_rate` — Poisson arrival intensity λ
    /// * `service_time` — deterministic service time `b` of one channel
    /// * `channels` — number of identical channels `n`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameters`] when `n < 1`, when λ or `b` is not finite
    /// and positive, or when the queue is saturated (`λ·b ≥ n`), since no
    /// steady state exists then.
    ///
    /// [`Error::InvalidParameters`]: qt_core::Error::InvalidParameters
    pub fn new(arrival_rate: Rate, service_time: Time, channels: Size) -> Result<Self> {
        Self::builder(arrival_rate, service_time, channels).build()
    }

    /// Parameters given the per-channel utilization ρ instead of the service
    /// time; `b = ρ·n / λ`.  Fails like [`new`](Self::new), so `ρ ≥ 1` is
    /// rejected as saturated.
    pub fn from_utilization(arrival_rate: Rate, utilization: Real, channels: Size) -> Result<Self> {
        ensure!(
            arrival_rate.is_finite() && arrival_rate > 0.0,
            "arrival rate must be finite and positive, got {arrival_rate}"
        );
        ensure!(
            utilization.is_finite() && utilization > 0.0,
            "utilization must be finite and positive, got {utilization}"
        );
        Self::new(
            arrival_rate,
            utilization * channels as Real / arrival_rate,
            channels,
        )
    }

    /// Start a builder with default numerical settings.
    pub fn builder(
        arrival_rate: Rate,
        service_time: Time,
        channels: Size,
    ) -> QueueParametersBuilder {
        QueueParametersBuilder {
            params: Self {
                arrival_rate,
                service_time,
                channels,
                tolerance: DEFAULT_TOLERANCE,
                length: DEFAULT_LENGTH,
                max_iterations: DEFAULT_MAX_ITERATIONS,
                convergence: ConvergenceCriterion::default(),
                residual_tolerance: DEFAULT_RESIDUAL_TOLERANCE,
            },
        }
    }

    /// Check every constraint on the parameters.
    ///
    /// Called by the builder; also useful for values obtained by
    /// deserialization.
    pub fn validate(&self) -> Result<()> {
        let Self {
            arrival_rate,
            service_time,
            channels,
            tolerance,
            length,
            max_iterations,
            residual_tolerance,
            ..
        } = *self;
        ensure!(channels >= 1, "channel count must be at least 1, got {channels}");
        ensure!(
            arrival_rate.is_finite() && arrival_rate > 0.0,
            "arrival rate must be finite and positive, got {arrival_rate}"
        );
        ensure!(
            service_time.is_finite() && service_time > 0.0,
            "service time must be finite and positive, got {service_time}"
        );
        ensure!(
            tolerance.is_finite() && tolerance > 0.0,
            "tolerance must be finite and positive, got {tolerance}"
        );
        ensure!(
            length > channels,
            "probability vector length must be at least {}, got {length}",
            channels + 1
        );
        ensure!(max_iterations >= 1, "iteration bound must be at least 1");
        ensure!(
            residual_tolerance > 0.0,
            "residual tolerance must be positive, got {residual_tolerance}"
        );
        let load = arrival_rate * service_time;
        ensure!(
            load < channels as Real,
            "offered load λ·b = {load} must be below the channel count {channels} for a steady state to exist"
        );
        Ok(())
    }

    /// Arrival rate λ.
    pub fn arrival_rate(&self) -> Rate {
        self.arrival_rate
    }

    /// Deterministic service time `b`.
    pub fn service_time(&self) -> Time {
        self.service_time
    }

    /// Number of channels `n`.
    pub fn channels(&self) -> Size {
        self.channels
    }

    /// Convergence tolerance ε of the root finder.
    pub fn tolerance(&self) -> Real {
        self.tolerance
    }

    /// Length of the probability vector.
    pub fn length(&self) -> Size {
        self.length
    }

    /// Iteration bound of the root finder.
    pub fn max_iterations(&self) -> Size {
        self.max_iterations
    }

    /// Convergence test applied by the root finder.
    pub fn convergence(&self) -> ConvergenceCriterion {
        self.convergence
    }

    /// Largest acceptable least-squares residual.
    pub fn residual_tolerance(&self) -> Real {
        self.residual_tolerance
    }

    /// Offered load `λ·b`, the mean number of arrivals per service time.
    pub fn offered_load(&self) -> Real {
        self.arrival_rate * self.service_time
    }

    /// Per-channel utilization `ρ = λ·b / n`.
    pub fn utilization(&self) -> Real {
        self.offered_load() / self.channels as Real
    }
}

/// Builder for [`QueueParameters`].
#[derive(Debug, Clone)]
pub struct QueueParametersBuilder {
    params: QueueParameters,
}

impl QueueParametersBuilder {
    /// Convergence tolerance ε of the root finder.
    pub fn tolerance(mut self, tolerance: Real) -> Self {
        self.params.tolerance = tolerance;
        self
    }

    /// Length of the probability vector.
    pub fn length(mut self, length: Size) -> Self {
        self.params.length = length;
        self
    }

    /// Iteration bound of the root finder.
    pub fn max_iterations(mut self, max_iterations: Size) -> Self {
        self.params.max_iterations = max_iterations;
        self
    }

    /// Convergence test applied by the root finder.
    pub fn convergence(mut self, convergence: ConvergenceCriterion) -> Self {
        self.params.convergence = convergence;
        self
    }

    /// Largest acceptable least-squares residual.
    pub fn residual_tolerance(mut self, residual_tolerance: Real) -> Self {
        self.params.residual_tolerance = residual_tolerance;
        self
    }

    /// Validate and return the parameters.
    pub fn build(self) -> Result<QueueParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}
