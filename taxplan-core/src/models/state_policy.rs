use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// How a state taxes the amount under consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateTaxPolicy {
    /// A single rate applied to the whole amount.
    Flat(Decimal),
    NoIncomeTax,
}

impl StateTaxPolicy {
    /// State tax owed on `amount`, rounded to cents.
    pub fn apply(
        &self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Self::Flat(rate) => round_half_up(amount * rate),
            Self::NoIncomeTax => Decimal::ZERO,
        }
    }
}
