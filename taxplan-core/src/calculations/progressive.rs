//! Progressive (bracket-accumulated) tax.
//!
//! The amount is filled into tiers from the bottom up. Each tier takes
//! `min(remaining, upper_bound)`, so a tier's cap is its upper bound itself
//! rather than its distance from the tier below. The slice is taxed at that
//! tier's rate. Used for long-term capital gains.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::BracketTier;

/// The part of an amount that landed in one tier.
///
/// Values are unrounded so slices can be summed without drift.
/// `filled_before` is the part of the amount taken by earlier tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSlice {
    pub rate: Decimal,
    pub filled_before: Decimal,
    pub upper_bound: Option<Decimal>,
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Distributes `amount` across `tiers` and returns one slice per tier touched.
///
/// Walking stops once the amount is used up or the tiers run out; for a table
/// ending in an unbounded tier the `taxable` values always sum to `amount`.
/// Negative amounts produce no slices.
pub fn progressive_breakdown(
    amount: Decimal,
    tiers: &[BracketTier],
) -> Vec<TierSlice> {
    let mut slices = Vec::with_capacity(tiers.len());
    let mut remaining = amount;

    for tier in tiers {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable = match tier.upper_bound {
            Some(upper) => remaining.min(upper),
            None => remaining,
        };

        if taxable > Decimal::ZERO {
            slices.push(TierSlice {
                rate: tier.rate,
                filled_before: amount - remaining,
                upper_bound: tier.upper_bound,
                taxable,
                tax: taxable * tier.rate,
            });
            remaining -= taxable;
        }
    }

    slices
}

/// Progressive tax on `amount`, rounded to cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::calculations::brackets::CAPITAL_GAINS_SINGLE;
/// use taxplan_core::progressive_tax;
///
/// // 0% on the first 44,625 and 15% on the remaining 55,375.
/// assert_eq!(progressive_tax(dec!(100000), &CAPITAL_GAINS_SINGLE), dec!(8306.25));
/// ```
pub fn progressive_tax(
    amount: Decimal,
    tiers: &[BracketTier],
) -> Decimal {
    let tax: Decimal = progressive_breakdown(amount, tiers)
        .iter()
        .map(|slice| slice.tax)
        .sum();
    round_half_up(tax)
}
