//! Market parameters shared by every valuation in an experiment.

use crate::day_counter::DayCounter;
use cfp_core::{ensure, errors::Result, Rate, Real};
use chrono::NaiveDate;
use serde::Serialize;

/// Resolved scalar market inputs.
///
/// Immutable once built; pricers borrow it for each call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketParameters {
    spot: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    pricing_date: NaiveDate,
    day_counter: DayCounter,
}

impl MarketParameters {
    /// Create market parameters with zero dividend yield and Actual/365
    /// (Fixed) day counting.
    pub fn new(spot: Real, risk_free_rate: Rate, pricing_date: NaiveDate) -> Result<Self> {
        ensure!(
            spot > 0.0 && spot.is_finite(),
            "spot must be positive and finite, got {spot}"
        );
        ensure!(
            risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {risk_free_rate}"
        );
        Ok(Self {
            spot,
            risk_free_rate,
            dividend_yield: 0.0,
            pricing_date,
            day_counter: DayCounter::default(),
        })
    }

    /// Set a continuous dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: Rate) -> Result<Self> {
        ensure!(
            dividend_yield.is_finite(),
            "dividend yield must be finite, got {dividend_yield}"
        );
        self.dividend_yield = dividend_yield;
        Ok(self)
    }

    /// Set the day counter used for times to maturity.
    pub fn with_day_counter(mut self, day_counter: DayCounter) -> Self {
        self.day_counter = day_counter;
        self
    }

    /// Spot price of the underlying.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Continuously-compounded risk-free rate.
    pub fn risk_free_rate(&self) -> Rate {
        self.risk_free_rate
    }

    /// Continuous dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// Valuation date.
    pub fn pricing_date(&self) -> NaiveDate {
        self.pricing_date
    }

    /// Day-count convention.
    pub fn day_counter(&self) -> DayCounter {
        self.day_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
    }

    #[test]
    fn defaults() {
        let m = MarketParameters::new(100.0, 0.01, date()).unwrap();
        assert_eq!(m.dividend_yield(), 0.0);
        assert_eq!(m.day_counter(), DayCounter::Actual365Fixed);
    }

    #[test]
    fn rejects_non_positive_spot() {
        for spot in [0.0, -1.0, Real::NAN] {
            let err = MarketParameters::new(spot, 0.01, date()).unwrap_err();
            assert!(err.is_configuration(), "{err}");
        }
    }

    #[test]
    fn builder_overrides() {
        let m = MarketParameters::new(100.0, 0.01, date())
            .unwrap()
            .with_dividend_yield(0.02)
            .unwrap()
            .with_day_counter(DayCounter::Actual360);
        assert_eq!(m.dividend_yield(), 0.02);
        assert_eq!(m.day_counter(), DayCounter::Actual360);
    }
}
