//! The state-probability vector produced by the solver.

use std::ops::Index;

use qt_core::{Probability, Real, Size};

/// How the tail recursion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TailTermination {
    /// Every entry up to the configured length was filled.
    Completed,
    /// The recursion would have produced a negative value at `index`; that
    /// entry and all later ones were left at zero.
    StabilityBoundary {
        /// First entry that was not filled.
        index: Size,
    },
}

/// Steady-state probabilities `p_0, p_1, …` of the number of jobs in the
/// system, truncated to a fixed length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbabilityVector {
    values: Vec<Probability>,
    termination: TailTermination,
}

impl ProbabilityVector {
    /// Wrap a filled vector and the way its tail ended.
    pub fn new(values: Vec<Probability>, termination: TailTermination) -> Self {
        Self {
            values,
            termination,
        }
    }

    /// All entries, including the zero padding after an early stop.
    pub fn as_slice(&self) -> &[Probability] {
        &self.values
    }

    /// Consume and return the entries.
    pub fn into_vec(self) -> Vec<Probability> {
        self.values
    }

    /// Configured length.
    pub fn len(&self) -> Size {
        self.values.len()
    }

    /// Return `true` if the vector has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry `k`, or `None` past the end.
    pub fn get(&self, k: Size) -> Option<Probability> {
        self.values.get(k).copied()
    }

    /// How the tail recursion ended.
    pub fn termination(&self) -> TailTermination {
        self.termination
    }

    /// Return `true` if the recursion stopped before the configured length.
    pub fn stopped_early(&self) -> bool {
        matches!(self.termination, TailTermination::StabilityBoundary { .. })
    }

    /// Number of entries actually computed.
    pub fn filled_len(&self) -> Size {
        match self.termination {
            TailTermination::Completed => self.values.len(),
            TailTermination::StabilityBoundary { index } => index.min(self.values.len()),
        }
    }

    /// The computed prefix, without the zero padding.
    pub fn filled(&self) -> &[Probability] {
        &self.values[..self.filled_len()]
    }

    /// Sum of all entries; close to one when the vector is long enough.
    pub fn total_mass(&self) -> Real {
        self.values.iter().sum()
    }

    /// `Σ_{k ≤ last} p_k`.
    pub fn cumulative(&self, last: Size) -> Real {
        self.values.iter().take(last + 1).sum()
    }

    /// Mean number of jobs in the system, `Σ k·p_k`.
    pub fn mean(&self) -> Real {
        self.values
            .iter()
            .enumerate()
            .map(|(k, p)| k as Real * p)
            .sum()
    }
}

impl Index<Size> for ProbabilityVector {
    type Output = Probability;

    fn index(&self, k: Size) -> &Probability {
        &self.values[k]
    }
}

impl AsRef<[Probability]> for ProbabilityVector {
    fn as_ref(&self) -> &[Probability] {
        &self.values
    }
}
