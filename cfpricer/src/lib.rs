//! # cfpricer
//!
//! Fourier-transform pricing of European options under geometric Brownian
//! motion, Merton jump diffusion, Heston and Bates dynamics, with a Monte
//! Carlo benchmark harness.
//!
//! This crate is a façade over the workspace crates.
//!
//! ```rust
//! use cfpricer::models::{GbmParameters, OptionType, ValuationHorizon};
//! use cfpricer::pricingengines::GbmFourierEngine;
//!
//! let engine = GbmFourierEngine::with_defaults(GbmParameters::new(0.2).unwrap());
//! let horizon = ValuationHorizon::new(100.0, 0.05, 0.0, 1.0).unwrap();
//! let call = engine.price(100.0, OptionType::Call, &horizon).unwrap().price;
//! assert!((call - 10.450583572185565).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use cfp_core as core;

/// Integration, distributions and statistics.
pub use cfp_math as math;

/// Market, contract and model parameters; characteristic functions.
pub use cfp_models as models;

/// Monte Carlo valuation.
pub use cfp_methods as methods;

/// Transform and analytic pricing engines.
pub use cfp_pricingengines as pricingengines;

/// Simulation-versus-transform benchmarks and experiment configuration.
pub use cfp_benchmark as benchmark;
