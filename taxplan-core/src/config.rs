//! Calculator configuration.
//!
//! Every field has a default, so a partial TOML document (or none at all)
//! yields a usable configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::state::{
    DEFAULT_STATE_TAX_RATE, NO_INCOME_TAX_STATES, StateTaxRules, normalize_state_code,
};
use crate::calculations::validation::{
    AmountValidator, DEFAULT_MAX_AMOUNT, MAX_SUPPORTED_AMOUNT,
};

/// Errors raised when a configuration is out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The maximum amount must be positive and within [`MAX_SUPPORTED_AMOUNT`].
    #[error("maximum amount must be positive and at most {max}, got {0}", max = MAX_SUPPORTED_AMOUNT)]
    InvalidMaximum(Decimal),

    /// The flat state rate must be between 0 and 1.
    #[error("state tax rate must be between 0 and 1, got {0}")]
    InvalidStateRate(Decimal),

    #[error("unknown state code '{0}' in no-income-tax states")]
    UnknownNoTaxState(String),
}

/// Tunable limits and rates for a [`crate::TaxCalculator`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::CalculatorConfig;
///
/// let config = CalculatorConfig::default();
///
/// assert_eq!(config.state_tax_rate, dec!(0.05));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Largest amount accepted by the validator.
    pub max_amount: Decimal,

    /// Flat rate applied in every state that levies income tax.
    pub state_tax_rate: Decimal,

    /// Postal codes treated as levying no income tax.
    pub no_income_tax_states: Vec<String>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_amount: DEFAULT_MAX_AMOUNT,
            state_tax_rate: DEFAULT_STATE_TAX_RATE,
            no_income_tax_states: NO_INCOME_TAX_STATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CalculatorConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `max_amount` is not positive or is above [`MAX_SUPPORTED_AMOUNT`]
    /// - `state_tax_rate` is not in [0, 1]
    /// - a no-income-tax state code is not recognized
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.state_rules().map(|_| ())
    }

    /// Builds the amount validator described by this configuration.
    pub fn validator(&self) -> Result<AmountValidator, ConfigError> {
        if self.max_amount <= Decimal::ZERO || self.max_amount > MAX_SUPPORTED_AMOUNT {
            return Err(ConfigError::InvalidMaximum(self.max_amount));
        }
        Ok(AmountValidator::new(self.max_amount))
    }

    /// Builds the state rules described by this configuration.
    pub fn state_rules(&self) -> Result<StateTaxRules, ConfigError> {
        self.validator()?;

        if self.state_tax_rate < Decimal::ZERO || self.state_tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidStateRate(self.state_tax_rate));
        }

        let no_income_tax = self
            .no_income_tax_states
            .iter()
            .map(|code| {
                normalize_state_code(code)
                    .map_err(|_| ConfigError::UnknownNoTaxState(code.clone()))
            })
            .collect::<Result<_, _>>()?;

        Ok(StateTaxRules::from_normalized(
            self.state_tax_rate,
            no_income_tax,
        ))
    }
}
