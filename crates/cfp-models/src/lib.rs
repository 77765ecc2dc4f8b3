//! # cfp-models
//!
//! Strongly-typed inputs for a valuation and the characteristic functions of
//! the log terminal price under each supported model.
//!
//! | Type | Role |
//! |---|---|
//! | [`MarketParameters`] | spot, rates, pricing date, day counter |
//! | [`ContractParameters`] | strike, maturity, option type |
//! | [`ValuationHorizon`] | scalar inputs resolved for one valuation |
//! | [`GbmParameters`] | geometric Brownian motion |
//! | [`JumpDiffusionParameters`] | Merton (1976) jump diffusion |
//! | [`StochasticVolatilityParameters`] | Heston (1993) |
//! | [`StochasticVolatilityJumpParameters`] | Bates (1996) |
//! | [`ModelParameters`] | tagged union of the four models |

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Bates stochastic volatility with jumps.
pub mod bates;
/// The characteristic function trait.
pub mod characteristic_function;
/// Contract parameters.
pub mod contract;
/// Day-count conventions.
pub mod day_counter;
/// Geometric Brownian motion.
pub mod gbm;
/// Heston stochastic volatility.
pub mod heston;
/// Resolved valuation inputs.
pub mod horizon;
/// Merton jump diffusion and shared jump parameters.
pub mod jump_diffusion;
/// Market parameters.
pub mod market;
/// Tagged model dispatch.
pub mod model;
/// Call / put.
pub mod option_type;
/// Valuation results.
pub mod valuation;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bates::StochasticVolatilityJumpParameters;
pub use characteristic_function::CharacteristicFunction;
pub use contract::ContractParameters;
pub use day_counter::DayCounter;
pub use gbm::GbmParameters;
pub use heston::StochasticVolatilityParameters;
pub use horizon::ValuationHorizon;
pub use jump_diffusion::{JumpDiffusionParameters, JumpParameters};
pub use market::MarketParameters;
pub use model::{ModelKind, ModelParameters};
pub use option_type::OptionType;
pub use valuation::ValuationResult;

pub use chrono::NaiveDate;
pub use num_complex::Complex64;
