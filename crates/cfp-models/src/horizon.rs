//! Scalar inputs resolved for a single valuation.

use crate::{contract::ContractParameters, market::MarketParameters};
use cfp_core::{ensure, errors::Result, DiscountFactor, Rate, Real, Time};

/// Spot, rates and time to maturity for one valuation.
///
/// Characteristic functions and transform integrals only need these
/// scalars; dates and day counting are resolved before this point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationHorizon {
    spot: Real,
    rate: Rate,
    dividend_yield: Rate,
    time: Time,
}

impl ValuationHorizon {
    /// Create a horizon; spot and time must be positive.
    pub fn new(spot: Real, rate: Rate, dividend_yield: Rate, time: Time) -> Result<Self> {
        ensure!(
            spot > 0.0 && spot.is_finite(),
            "spot must be positive and finite, got {spot}"
        );
        ensure!(
            time > 0.0 && time.is_finite(),
            "time to maturity must be positive, got {time}"
        );
        ensure!(
            rate.is_finite() && dividend_yield.is_finite(),
            "rates must be finite (r = {rate}, q = {dividend_yield})"
        );
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            time,
        })
    }

    /// Resolve the horizon of `contract` under `market`.
    pub fn from_market(market: &MarketParameters, contract: &ContractParameters) -> Result<Self> {
        let time = contract.time_to_maturity(market)?;
        Self::new(
            market.spot(),
            market.risk_free_rate(),
            market.dividend_yield(),
            time,
        )
    }

    /// Spot price.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// Time to maturity in years.
    pub fn time(&self) -> Time {
        self.time
    }

    /// `ln S0`
    pub fn log_spot(&self) -> Real {
        self.spot.ln()
    }

    /// `e^{−rT}`
    pub fn discount_factor(&self) -> DiscountFactor {
        (-self.rate * self.time).exp()
    }

    /// `e^{−qT}`
    pub fn dividend_discount(&self) -> DiscountFactor {
        (-self.dividend_yield * self.time).exp()
    }

    /// Forward price `S0 e^{(r−q)T}`.
    pub fn forward(&self) -> Real {
        self.spot * ((self.rate - self.dividend_yield) * self.time).exp()
    }
}
