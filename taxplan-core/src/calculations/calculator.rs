use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::brackets::BracketSchedule;
use crate::calculations::effective_rate::effective_rate;
use crate::calculations::state::StateTaxRules;
use crate::calculations::validation::AmountValidator;
use crate::config::{CalculatorConfig, ConfigError};
use crate::error::TaxError;
use crate::models::{RawAmount, StateTaxPolicy, TaxImpact};

/// Calculator holding the validator, bracket schedule, and state rules.
///
/// Immutable once built; share it by reference across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxCalculator {
    validator: AmountValidator,
    schedule: BracketSchedule,
    state_rules: StateTaxRules,
}

impl TaxCalculator {
    /// Builds a calculator from `config` using the compiled-in bracket tables.
    pub fn new(config: &CalculatorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            validator: config.validator()?,
            schedule: BracketSchedule::default(),
            state_rules: config.state_rules()?,
        })
    }

    /// Replaces the bracket schedule.
    pub fn with_schedule(
        mut self,
        schedule: BracketSchedule,
    ) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn validator(&self) -> &AmountValidator {
        &self.validator
    }

    pub fn schedule(&self) -> &BracketSchedule {
        &self.schedule
    }

    pub fn state_rules(&self) -> &StateTaxRules {
        &self.state_rules
    }

    /// Validates the amount and resolves the state before any arithmetic.
    pub(crate) fn prepare(
        &self,
        amount: RawAmount,
        state_code: &str,
    ) -> Result<(Decimal, StateTaxPolicy), TaxError> {
        let amount = self.validator.validate(amount)?;
        let policy = self.state_rules.policy_for(state_code)?;
        Ok((amount, policy))
    }

    /// Combines a federal figure with the state policy into a [`TaxImpact`].
    pub(crate) fn impact(
        &self,
        amount: Decimal,
        federal_tax: Decimal,
        policy: StateTaxPolicy,
    ) -> Result<TaxImpact, TaxError> {
        let state_tax = policy.apply(amount);
        let total_tax = federal_tax + state_tax;
        let effective_rate = effective_rate(total_tax, amount)?;

        let impact = TaxImpact {
            federal_tax,
            state_tax,
            total_tax,
            effective_rate,
        };
        debug!(
            amount = %amount,
            federal_tax = %impact.federal_tax,
            state_tax = %impact.state_tax,
            effective_rate = %impact.effective_rate,
            "Calculated tax impact"
        );
        Ok(impact)
    }
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self {
            validator: AmountValidator::default(),
            schedule: BracketSchedule::default(),
            state_rules: StateTaxRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::validation::MAX_SUPPORTED_AMOUNT;
    use crate::models::FilingStatus;

    #[test]
    fn default_matches_default_config() {
        let from_config = TaxCalculator::new(&CalculatorConfig::default()).unwrap();

        assert_eq!(from_config, TaxCalculator::default());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = CalculatorConfig {
            state_tax_rate: dec!(2),
            ..CalculatorConfig::default()
        };

        assert_eq!(
            TaxCalculator::new(&config),
            Err(ConfigError::InvalidStateRate(dec!(2)))
        );
    }

    #[test]
    fn prepare_validates_before_resolving_state() {
        let calculator = TaxCalculator::default();

        let result = calculator.prepare(RawAmount::from(dec!(-5)), "ZZ");

        assert_eq!(result, Err(TaxError::Negative(dec!(-5))));
    }

    #[test]
    fn impact_keeps_total_identity() {
        let calculator = TaxCalculator::default();

        let impact = calculator
            .impact(dec!(12345.67), dec!(1234.57), StateTaxPolicy::Flat(dec!(0.05)))
            .unwrap();

        assert_eq!(impact.state_tax, dec!(617.28));
        assert_eq!(impact.total_tax, dec!(1851.85));
        assert_eq!(impact.total_tax, impact.federal_tax + impact.state_tax);
    }

    #[test]
    fn largest_supported_amount_totals_without_overflow() {
        let config = CalculatorConfig {
            max_amount: MAX_SUPPORTED_AMOUNT,
            state_tax_rate: dec!(1),
            ..CalculatorConfig::default()
        };
        let calculator = TaxCalculator::new(&config).unwrap();

        let impact = calculator
            .roth_conversion_tax(MAX_SUPPORTED_AMOUNT, FilingStatus::Single, "CA")
            .unwrap();

        assert_eq!(impact.federal_tax, dec!(370000000000000.00));
        assert_eq!(impact.state_tax, dec!(1000000000000000.00));
        assert_eq!(impact.total_tax, dec!(1370000000000000.00));
        assert_eq!(impact.effective_rate, dec!(1.37));
    }
}
