//! Contract parameters for a European option.

use crate::{market::MarketParameters, option_type::OptionType};
use cfp_core::{ensure, errors::Result, Real, Time};
use chrono::NaiveDate;
use serde::Serialize;

/// Strike, maturity and type of a European option.
///
/// Mutable across a benchmark sweep. Nothing derived from it is cached, so
/// an update is visible to the next valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractParameters {
    strike: Real,
    maturity: NaiveDate,
    option_type: OptionType,
}

impl ContractParameters {
    /// Create a contract; the strike must be positive.
    pub fn new(strike: Real, maturity: NaiveDate, option_type: OptionType) -> Result<Self> {
        check_strike(strike)?;
        Ok(Self {
            strike,
            maturity,
            option_type,
        })
    }

    /// Strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Expiry date.
    pub fn maturity(&self) -> NaiveDate {
        self.maturity
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Replace the strike.
    pub fn set_strike(&mut self, strike: Real) -> Result<()> {
        check_strike(strike)?;
        self.strike = strike;
        Ok(())
    }

    /// Replace the maturity. Checked against the pricing date when the
    /// contract is valued.
    pub fn set_maturity(&mut self, maturity: NaiveDate) {
        self.maturity = maturity;
    }

    /// Same contract with another option type.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Year fraction from the pricing date to maturity.
    pub fn time_to_maturity(&self, market: &MarketParameters) -> Result<Time> {
        ensure!(
            self.maturity > market.pricing_date(),
            "maturity {} must be after the pricing date {}",
            self.maturity,
            market.pricing_date()
        );
        Ok(market
            .day_counter()
            .year_fraction(market.pricing_date(), self.maturity))
    }
}

fn check_strike(strike: Real) -> Result<()> {
    ensure!(
        strike > 0.0 && strike.is_finite(),
        "strike must be positive and finite, got {strike}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn time_to_maturity_uses_market_day_counter() {
        let market = MarketParameters::new(100.0, 0.01, date(2015, 1, 1)).unwrap();
        let contract = ContractParameters::new(100.0, date(2015, 3, 31), OptionType::Call).unwrap();
        let t = contract.time_to_maturity(&market).unwrap();
        assert!((t - 89.0 / 365.0).abs() < 1e-15);
    }

    #[test]
    fn maturity_on_or_before_pricing_date_fails() {
        let market = MarketParameters::new(100.0, 0.01, date(2015, 1, 1)).unwrap();
        let mut contract =
            ContractParameters::new(100.0, date(2015, 1, 1), OptionType::Put).unwrap();
        assert!(contract.time_to_maturity(&market).unwrap_err().is_configuration());
        contract.set_maturity(date(2014, 6, 1));
        assert!(contract.time_to_maturity(&market).is_err());
    }

    #[test]
    fn strike_updates_are_validated() {
        let mut contract =
            ContractParameters::new(100.0, date(2015, 3, 31), OptionType::Call).unwrap();
        assert!(contract.set_strike(-5.0).is_err());
        assert_eq!(contract.strike(), 100.0);
        contract.set_strike(90.0).unwrap();
        assert_eq!(contract.strike(), 90.0);
        assert!(ContractParameters::new(0.0, date(2015, 3, 31), OptionType::Call).is_err());
    }
}
