use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Federal and state liability for a single scenario.
///
/// Money fields are rounded to cents and `total_tax` is always exactly
/// `federal_tax + state_tax`. `effective_rate` is a fraction rounded to six
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxImpact {
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
}
