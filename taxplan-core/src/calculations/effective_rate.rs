use rust_decimal::Decimal;

use crate::calculations::common::round_rate;
use crate::error::TaxError;

/// Total tax as a fraction of total income, rounded to six places.
///
/// Zero income yields a zero rate rather than a division error.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::effective_rate;
///
/// assert_eq!(effective_rate(dec!(8306.25), dec!(100000)), Ok(dec!(0.083063)));
/// assert_eq!(effective_rate(dec!(0), dec!(0)), Ok(dec!(0)));
/// ```
pub fn effective_rate(
    total_tax: Decimal,
    total_income: Decimal,
) -> Result<Decimal, TaxError> {
    let invalid = || TaxError::InvalidInput {
        total_tax,
        total_income,
    };

    if total_tax < Decimal::ZERO || total_income < Decimal::ZERO {
        return Err(invalid());
    }

    if total_income.is_zero() {
        return Ok(Decimal::ZERO);
    }

    total_tax
        .checked_div(total_income)
        .map(round_rate)
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn zero_income_guard() {
        assert_eq!(effective_rate(dec!(0), dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn zero_income_with_tax_is_still_zero() {
        assert_eq!(effective_rate(dec!(10), dec!(0)), Ok(dec!(0)));
    }

    #[test]
    fn divides_and_rounds_to_six_places() {
        // 1650 / 11000 = 0.15
        assert_eq!(effective_rate(dec!(1650.00), dec!(11000)), Ok(dec!(0.15)));
        // 100 / 300 = 0.3333...
        assert_eq!(effective_rate(dec!(100), dec!(300)), Ok(dec!(0.333333)));
    }

    #[test]
    fn negative_tax_is_invalid() {
        assert_eq!(
            effective_rate(dec!(-1), dec!(100)),
            Err(TaxError::InvalidInput {
                total_tax: dec!(-1),
                total_income: dec!(100),
            })
        );
    }

    #[test]
    fn negative_income_is_invalid() {
        assert_eq!(
            effective_rate(dec!(1), dec!(-100)),
            Err(TaxError::InvalidInput {
                total_tax: dec!(1),
                total_income: dec!(-100),
            })
        );
    }
}
