//! The pricer interface shared by every engine.

use cfp_core::{errors::Result, Real};
use cfp_models::{ContractParameters, MarketParameters, ValuationResult};
use std::fmt;

/// A European option pricer.
///
/// Pricers hold model parameters only. Every call derives its result from
/// the contract and market passed in; nothing is cached between calls.
pub trait OptionPricer: fmt::Debug + Send + Sync {
    /// Value `contract` under `market`, with diagnostics.
    fn valuation(
        &self,
        contract: &ContractParameters,
        market: &MarketParameters,
    ) -> Result<ValuationResult>;

    /// Present value of `contract` under `market`.
    fn present_value(&self, contract: &ContractParameters, market: &MarketParameters) -> Result<Real> {
        Ok(self.valuation(contract, market)?.present_value)
    }
}
