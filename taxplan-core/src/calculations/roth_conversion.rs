//! Tax on a Roth conversion.
//!
//! The whole conversion is taxed at the marginal ordinary-income rate that
//! covers the conversion amount. The amount is not accumulated across lower
//! brackets, unlike capital gains.

use tracing::debug;

use crate::calculations::calculator::TaxCalculator;
use crate::calculations::common::round_half_up;
use crate::calculations::marginal::marginal_rate_in;
use crate::error::TaxError;
use crate::models::{FilingStatus, RawAmount, TaxImpact};

impl TaxCalculator {
    /// Federal and state tax triggered by converting `amount` to a Roth account.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if the amount fails validation or the state code is
    /// not recognized. Nothing is computed in either case.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use taxplan_core::{FilingStatus, TaxCalculator};
    ///
    /// let calculator = TaxCalculator::default();
    /// let impact = calculator
    ///     .roth_conversion_tax(dec!(11000), FilingStatus::Single, "CA")
    ///     .unwrap();
    ///
    /// assert_eq!(impact.federal_tax, dec!(1100.00));
    /// assert_eq!(impact.state_tax, dec!(550.00));
    /// assert_eq!(impact.total_tax, dec!(1650.00));
    /// assert_eq!(impact.effective_rate, dec!(0.15));
    /// ```
    pub fn roth_conversion_tax(
        &self,
        amount: impl Into<RawAmount>,
        status: FilingStatus,
        state_code: &str,
    ) -> Result<TaxImpact, TaxError> {
        let (amount, policy) = self.prepare(amount.into(), state_code)?;

        let rate = marginal_rate_in(amount, self.schedule().ordinary(status).tiers());
        debug!(amount = %amount, %status, rate = %rate, "Resolved marginal rate for conversion");

        let federal_tax = round_half_up(amount * rate);
        self.impact(amount, federal_tax, policy)
    }
}

/// [`TaxCalculator::roth_conversion_tax`] with the default configuration.
pub fn calculate_roth_conversion_tax(
    amount: impl Into<RawAmount>,
    status: FilingStatus,
    state_code: &str,
) -> Result<TaxImpact, TaxError> {
    TaxCalculator::default().roth_conversion_tax(amount, status, state_code)
}
