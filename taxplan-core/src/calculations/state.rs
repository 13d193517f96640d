//! State tax adjustment.
//!
//! States are modelled with a single flat rate; a fixed set of states levies
//! no income tax at all.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::error::TaxError;
use crate::models::StateTaxPolicy;

/// Flat rate applied to every income-taxing state.
pub const DEFAULT_STATE_TAX_RATE: Decimal = dec!(0.05);

/// States without a broad personal income tax.
pub static NO_INCOME_TAX_STATES: [&str; 9] = ["AK", "FL", "NH", "NV", "SD", "TN", "TX", "WA", "WY"];

/// Recognized postal codes: the fifty states and DC.
pub static STATE_CODES: [&str; 51] = [
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN",
    "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ",
    "NM", "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA",
    "WI", "WV", "WY",
];

/// Resolves `code` (any case, surrounding whitespace ignored) to its canonical form.
pub fn normalize_state_code(code: &str) -> Result<&'static str, TaxError> {
    let upper = code.trim().to_ascii_uppercase();
    STATE_CODES
        .binary_search_by(|probe| (*probe).cmp(upper.as_str()))
        .map(|index| STATE_CODES[index])
        .map_err(|_| TaxError::UnknownStateCode(code.to_string()))
}

/// Flat rate plus the set of states that levy nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTaxRules {
    flat_rate: Decimal,
    no_income_tax: BTreeSet<&'static str>,
}

impl StateTaxRules {
    /// Fails with [`TaxError::UnknownStateCode`] if a no-tax code is not recognized.
    pub fn new<'a>(
        flat_rate: Decimal,
        no_income_tax_states: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, TaxError> {
        let no_income_tax = no_income_tax_states
            .into_iter()
            .map(normalize_state_code)
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self::from_normalized(flat_rate, no_income_tax))
    }

    pub(crate) fn from_normalized(
        flat_rate: Decimal,
        no_income_tax: BTreeSet<&'static str>,
    ) -> Self {
        Self {
            flat_rate,
            no_income_tax,
        }
    }

    pub fn flat_rate(&self) -> Decimal {
        self.flat_rate
    }

    pub fn no_income_tax_states(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.no_income_tax.iter().copied()
    }

    pub fn policy_for(
        &self,
        state_code: &str,
    ) -> Result<StateTaxPolicy, TaxError> {
        let code = normalize_state_code(state_code)?;
        let policy = if self.no_income_tax.contains(code) {
            StateTaxPolicy::NoIncomeTax
        } else {
            StateTaxPolicy::Flat(self.flat_rate)
        };

        debug!(state = code, ?policy, "Resolved state tax policy");
        Ok(policy)
    }
}

impl Default for StateTaxRules {
    fn default() -> Self {
        Self {
            flat_rate: DEFAULT_STATE_TAX_RATE,
            no_income_tax: NO_INCOME_TAX_STATES.into_iter().collect(),
        }
    }
}

/// State tax on `amount` for `state_code`, rounded to cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::{StateTaxRules, state_tax};
///
/// let rules = StateTaxRules::default();
///
/// assert_eq!(state_tax(dec!(100000), "CA", &rules), Ok(dec!(5000.00)));
/// assert_eq!(state_tax(dec!(100000), "tx", &rules), Ok(dec!(0)));
/// ```
pub fn state_tax(
    amount: Decimal,
    state_code: &str,
    rules: &StateTaxRules,
) -> Result<Decimal, TaxError> {
    Ok(rules.policy_for(state_code)?.apply(amount))
}
