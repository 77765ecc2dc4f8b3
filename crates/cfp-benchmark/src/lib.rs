//! # cfp-benchmark
//!
//! Cross-checks transform prices against a simulation estimator.
//!
//! A [`BenchmarkHarness`] walks a [`BenchmarkGrid`] of maturities × strike
//! ratios. At each point it re-points the [`SimulationValuation`] at the
//! contract, queries it once, prices the same contract with an
//! [`OptionPricer`](cfp_pricingengines::OptionPricer) and records a
//! [`BenchmarkRow`]. Experiments are described in TOML
//! ([`ExperimentConfig`]).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// TOML experiment configuration.
pub mod config;
/// Benchmark failures.
pub mod error;
/// Grid, rows and the sweep.
pub mod harness;
/// Report and summary.
pub mod report;
/// The simulation collaborator interface.
pub mod simulation;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ExperimentConfig;
pub use error::BenchmarkError;
pub use harness::{
    BenchmarkGrid, BenchmarkHarness, BenchmarkRow, RelativeDifference, TRANSFORM_NOISE_FLOOR,
};
pub use report::{BenchmarkReport, BenchmarkSummary};
pub use simulation::SimulationValuation;
