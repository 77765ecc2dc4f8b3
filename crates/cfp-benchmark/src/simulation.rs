//! The simulation collaborator seen by the harness.

use cfp_core::Real;
use cfp_methods::MonteCarloValuation;
use cfp_models::{NaiveDate, ValuationResult};

/// A simulation estimator that can be re-pointed at a new contract.
///
/// Calls may be slow and block; the harness makes them one at a time and
/// once per grid point.
pub trait SimulationValuation {
    /// Failure type, propagated unchanged to the harness caller.
    type Error: std::error::Error + 'static;

    /// Change the strike and/or maturity of the simulated contract.
    fn update(
        &mut self,
        strike: Option<Real>,
        maturity: Option<NaiveDate>,
    ) -> Result<(), Self::Error>;

    /// Present value and, if available, its standard error.
    fn present_value(&mut self) -> Result<ValuationResult, Self::Error>;
}

impl SimulationValuation for MonteCarloValuation {
    type Error = cfp_core::Error;

    fn update(
        &mut self,
        strike: Option<Real>,
        maturity: Option<NaiveDate>,
    ) -> Result<(), Self::Error> {
        MonteCarloValuation::update(self, strike, maturity)
    }

    fn present_value(&mut self) -> Result<ValuationResult, Self::Error> {
        MonteCarloValuation::present_value(self)
    }
}
