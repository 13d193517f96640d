//! Rounding helpers shared by every calculation.
//!
//! Currency leaves the crate at cent precision and rates at six decimal
//! places, both rounded half-up (midpoint away from zero).

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on returned rates.
pub const RATE_DECIMAL_PLACES: u32 = 6;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate to [`RATE_DECIMAL_PLACES`] using half-up rounding.
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::calculations::common::round_rate;
///
/// assert_eq!(round_rate(dec!(0.1234565)), dec!(0.123457));
/// ```
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
