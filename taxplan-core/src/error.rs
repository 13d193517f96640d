use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the calculation entry points.
///
/// Every variant is detected before any tax arithmetic runs, so a returned
/// error never comes with a partial result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// The amount was NaN or infinite.
    #[error("amount is not a finite number")]
    NonFinite,

    /// The amount was below zero and signed amounts were not allowed.
    #[error("amount must not be negative, got {0}")]
    Negative(Decimal),

    /// The amount was larger than the configured ceiling.
    #[error("amount {amount} exceeds the maximum supported amount {maximum}")]
    ExceedsMaximum { amount: Decimal, maximum: Decimal },

    /// The tax/income pair given to the effective-rate calculation is malformed.
    #[error("invalid effective rate input: total tax {total_tax}, total income {total_income}")]
    InvalidInput {
        total_tax: Decimal,
        total_income: Decimal,
    },

    #[error("unknown filing status '{0}'")]
    UnknownFilingStatus(String),

    #[error("unknown state code '{0}'")]
    UnknownStateCode(String),
}
