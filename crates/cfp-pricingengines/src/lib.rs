//! # cfp-pricingengines
//!
//! Pricing engines for European options.
//!
//! ## Engines
//!
//! - [`TransformEngine`]: Carr–Madan / Lewis Fourier pricing for any model
//!   with a characteristic function, with aliases per model
//! - [`FourierEngine`]: tagged dispatch over the four transform engines
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton closed form
//! - [`AnalyticMertonEngine`]: Merton (1976) Poisson series
//!
//! [`price_grid`] values many contracts in parallel with any
//! [`OptionPricer`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod analytic_merton_engine;
pub mod fourier_engine;
pub mod fourier_integrator;
pub mod grid;
pub mod pricer;

pub use analytic_european_engine::{black_scholes_merton, AnalyticEuropeanEngine};
pub use analytic_merton_engine::{merton76_series_price, AnalyticMertonEngine};
pub use fourier_engine::{
    FourierEngine, GbmFourierEngine, JumpDiffusionFourierEngine,
    StochasticVolatilityFourierEngine, StochasticVolatilityJumpFourierEngine, TransformEngine,
};
pub use fourier_integrator::{
    FourierIntegrator, FourierSettings, Quadrature, TransformMethod, TransformPrice,
    DEFAULT_DAMPING,
};
pub use grid::price_grid;
pub use pricer::OptionPricer;
