//! # qt-core
//!
//! Core types and error definitions for queueing-rs.
//!
//! This crate provides the foundational building blocks shared across the
//! other crates in the workspace: primitive type aliases, the error
//! hierarchy, and the `ensure!` / `fail!` macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes, indices and channel counts.
pub type Size = usize;

/// An arrival or service rate (events per unit time).
pub type Rate = Real;

/// A time measurement (same unit as the reciprocal of [`Rate`]).
pub type Time = Real;

/// A probability in [0, 1].
pub type Probability = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
