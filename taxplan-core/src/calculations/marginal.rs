//! Marginal rate lookup.
//!
//! Roth conversions are taxed at the single rate of the bracket that covers
//! the conversion amount; the amount is not spread across lower brackets.

use rust_decimal::Decimal;

use crate::calculations::brackets::federal_brackets;
use crate::models::{BracketTier, FilingStatus};

/// Marginal ordinary-income rate for `income` under the compiled-in tables.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::{FilingStatus, marginal_rate};
///
/// assert_eq!(marginal_rate(dec!(11000), FilingStatus::Single), dec!(0.10));
/// assert_eq!(marginal_rate(dec!(11000.01), FilingStatus::Single), dec!(0.12));
/// ```
pub fn marginal_rate(
    income: Decimal,
    status: FilingStatus,
) -> Decimal {
    marginal_rate_in(income, federal_brackets(status))
}

/// Rate of the first tier whose upper bound is at or above `income`.
///
/// Falls back to the last tier's rate when nothing covers `income`, and to
/// zero for an empty table.
pub fn marginal_rate_in(
    income: Decimal,
    tiers: &[BracketTier],
) -> Decimal {
    tiers
        .iter()
        .find(|tier| tier.covers(income))
        .or_else(|| tiers.last())
        .map_or(Decimal::ZERO, |tier| tier.rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn zero_income_uses_lowest_tier() {
        assert_eq!(marginal_rate(dec!(0), FilingStatus::Single), dec!(0.10));
    }

    #[test]
    fn boundary_income_stays_in_lower_tier() {
        assert_eq!(marginal_rate(dec!(11000), FilingStatus::Single), dec!(0.10));
        assert_eq!(
            marginal_rate(dec!(89450), FilingStatus::MarriedFilingJointly),
            dec!(0.12)
        );
        assert_eq!(
            marginal_rate(dec!(15700), FilingStatus::HeadOfHousehold),
            dec!(0.10)
        );
    }

    #[test]
    fn one_cent_over_boundary_moves_up() {
        assert_eq!(
            marginal_rate(dec!(44725.01), FilingStatus::Single),
            dec!(0.22)
        );
    }

    #[test]
    fn top_income_uses_unbounded_tier() {
        assert_eq!(
            marginal_rate(dec!(5000000), FilingStatus::MarriedFilingJointly),
            dec!(0.37)
        );
    }

    #[test]
    fn filing_status_changes_the_tier() {
        let income = dec!(50000);

        assert_eq!(marginal_rate(income, FilingStatus::Single), dec!(0.22));
        assert_eq!(
            marginal_rate(income, FilingStatus::MarriedFilingJointly),
            dec!(0.12)
        );
        assert_eq!(
            marginal_rate(income, FilingStatus::HeadOfHousehold),
            dec!(0.12)
        );
    }

    #[test]
    fn falls_back_to_last_tier_when_nothing_covers() {
        let tiers = [
            BracketTier::bounded(dec!(100), dec!(0.10)),
            BracketTier::bounded(dec!(200), dec!(0.20)),
        ];

        assert_eq!(marginal_rate_in(dec!(500), &tiers), dec!(0.20));
    }

    #[test]
    fn empty_table_yields_zero() {
        assert_eq!(marginal_rate_in(dec!(500), &[]), dec!(0));
    }
}
