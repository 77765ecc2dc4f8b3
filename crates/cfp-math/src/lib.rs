//! # cfp-math
//!
//! Mathematical utilities: numerical integration (finite and semi-infinite
//! domains), the normal distribution (via statrs), and a statistics
//! accumulator for simulation estimates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Numerical integration.
pub mod integrals;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use integrals::{
    FixedSimpsonIntegral, GaussKronrodAdaptive, Integrator, SemiInfiniteIntegral,
    TruncatedIntegral,
};
pub use statistics::Statistics;
