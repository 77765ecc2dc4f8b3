//! Parallel valuation of many contracts.

use cfp_core::{errors::Result, Real};
use cfp_models::{ContractParameters, MarketParameters};
use rayon::prelude::*;
use tracing::debug;

use crate::pricer::OptionPricer;

/// Present values of `contracts` under `market`, in input order.
///
/// Contracts are priced independently on the rayon pool; the first error
/// encountered is returned.
pub fn price_grid<P: OptionPricer + ?Sized>(
    engine: &P,
    market: &MarketParameters,
    contracts: &[ContractParameters],
) -> Result<Vec<Real>> {
    debug!(contracts = contracts.len(), "pricing grid");
    contracts
        .par_iter()
        .map(|contract| engine.present_value(contract, market))
        .collect()
}
