//! Tax on harvested long-term capital gains.
//!
//! Gains are accumulated progressively through the capital-gains table for the
//! filing status.

use crate::calculations::calculator::TaxCalculator;
use crate::calculations::progressive::{TierSlice, progressive_breakdown, progressive_tax};
use crate::error::TaxError;
use crate::models::{FilingStatus, RawAmount, TaxImpact};

impl TaxCalculator {
    /// Federal and state tax on realizing `amount` of long-term gains.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if the amount fails validation or the state code is
    /// not recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use taxplan_core::{FilingStatus, TaxCalculator};
    ///
    /// let impact = TaxCalculator::default()
    ///     .capital_gains_tax(dec!(100000), FilingStatus::Single, "CA")
    ///     .unwrap();
    ///
    /// // 0% on the first 44,625, 15% on the remaining 55,375
    /// assert_eq!(impact.federal_tax, dec!(8306.25));
    /// assert_eq!(impact.state_tax, dec!(5000.00));
    /// assert_eq!(impact.total_tax, dec!(13306.25));
    /// ```
    pub fn capital_gains_tax(
        &self,
        amount: impl Into<RawAmount>,
        status: FilingStatus,
        state_code: &str,
    ) -> Result<TaxImpact, TaxError> {
        let (amount, policy) = self.prepare(amount.into(), state_code)?;
        let federal_tax = progressive_tax(amount, self.schedule().capital_gains(status).tiers());
        self.impact(amount, federal_tax, policy)
    }

    /// Per-tier view of the federal capital-gains computation.
    pub fn capital_gains_breakdown(
        &self,
        amount: impl Into<RawAmount>,
        status: FilingStatus,
    ) -> Result<Vec<TierSlice>, TaxError> {
        let amount = self.validator().validate(amount)?;
        Ok(progressive_breakdown(
            amount,
            self.schedule().capital_gains(status).tiers(),
        ))
    }
}

/// [`TaxCalculator::capital_gains_tax`] with the default configuration.
pub fn calculate_capital_gains_tax(
    amount: impl Into<RawAmount>,
    status: FilingStatus,
    state_code: &str,
) -> Result<TaxImpact, TaxError> {
    TaxCalculator::default().capital_gains_tax(amount, status, state_code)
}
