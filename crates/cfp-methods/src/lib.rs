//! # cfp-methods
//!
//! Reference Monte Carlo valuation of European options under the four
//! transform models. Used to cross-check the Fourier engines.
//!
//! # Modules
//!
//! * [`monte_carlo`]: terminal-price samplers, settings and the
//!   [`MonteCarloValuation`] driver

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: terminal sampling, settings, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{MonteCarloSettings, MonteCarloValuation, TerminalSampler};
