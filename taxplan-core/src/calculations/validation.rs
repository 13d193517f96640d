//! Amount validation performed before any tax arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::error::TaxError;
use crate::models::RawAmount;

/// Largest amount accepted unless configured otherwise: one billion dollars.
pub const DEFAULT_MAX_AMOUNT: Decimal = dec!(1000000000.00);

/// Upper limit for a configured maximum. Rates never exceed one, so every
/// intermediate sum of an accepted amount stays far inside `Decimal`'s range.
pub const MAX_SUPPORTED_AMOUNT: Decimal = dec!(1000000000000000.00);

/// Checks that amounts are finite, non-negative, and within a ceiling.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::{AmountValidator, TaxError};
///
/// let validator = AmountValidator::default();
///
/// assert_eq!(validator.validate(dec!(11000)), Ok(dec!(11000)));
/// assert_eq!(validator.validate(f64::NAN), Err(TaxError::NonFinite));
/// assert_eq!(validator.validate(dec!(-1)), Err(TaxError::Negative(dec!(-1))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountValidator {
    max_amount: Decimal,
    allow_negative: bool,
}

impl AmountValidator {
    pub fn new(max_amount: Decimal) -> Self {
        Self {
            max_amount,
            allow_negative: false,
        }
    }

    /// Accepts negative amounts; the ceiling then applies to the magnitude.
    pub fn allow_negative(mut self) -> Self {
        self.allow_negative = true;
        self
    }

    pub fn max_amount(&self) -> Decimal {
        self.max_amount
    }

    /// Returns the amount as an exact decimal, or the first rule it breaks.
    ///
    /// Rules are checked in order: finiteness, sign, ceiling.
    pub fn validate(
        &self,
        amount: impl Into<RawAmount>,
    ) -> Result<Decimal, TaxError> {
        let amount = Self::to_decimal(amount.into())?;

        if amount < Decimal::ZERO && !self.allow_negative {
            warn!(amount = %amount, "Rejected negative amount");
            return Err(TaxError::Negative(amount));
        }

        if amount.abs() > self.max_amount {
            warn!(
                amount = %amount,
                maximum = %self.max_amount,
                "Rejected amount above supported maximum"
            );
            return Err(TaxError::ExceedsMaximum {
                amount,
                maximum: self.max_amount,
            });
        }

        Ok(amount)
    }

    fn to_decimal(raw: RawAmount) -> Result<Decimal, TaxError> {
        match raw {
            RawAmount::Decimal(value) => Ok(value),
            RawAmount::Float(value) if !value.is_finite() => {
                warn!(amount = value, "Rejected non-finite amount");
                Err(TaxError::NonFinite)
            }
            RawAmount::Float(value) => Ok(Decimal::try_from(value).unwrap_or_else(|_| {
                debug!(amount = value, "Saturating float outside the decimal range");
                Self::saturate(value)
            })),
        }
    }

    /// Maps a finite float that `Decimal` cannot hold onto the nearest
    /// representable value, so the sign and ceiling rules still apply.
    fn saturate(value: f64) -> Decimal {
        if value.abs() < 1.0 {
            Decimal::ZERO
        } else if value < 0.0 {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    }
}

impl Default for AmountValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AMOUNT)
    }
}
