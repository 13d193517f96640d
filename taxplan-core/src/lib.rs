//! Tax calculation core for Roth conversion and capital-gains scenarios.
//!
//! Everything in this crate is pure: amounts go in as [`rust_decimal::Decimal`]
//! (or raw `f64` values that get validated first) and value objects come out.
//! There is no I/O and no shared mutable state, so a [`TaxCalculator`] can be
//! shared freely across threads.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxplan_core::{FilingStatus, calculate_capital_gains_tax};
//!
//! let impact = calculate_capital_gains_tax(dec!(100000), FilingStatus::Single, "TX").unwrap();
//!
//! assert_eq!(impact.federal_tax, dec!(8306.25));
//! assert_eq!(impact.state_tax, dec!(0.00));
//! assert_eq!(impact.total_tax, impact.federal_tax);
//! ```

pub mod calculations;
pub mod config;
pub mod error;
pub mod models;

pub use calculations::{
    AmountValidator, BracketSchedule, StateTaxRules, TaxCalculator, TierSlice,
    calculate_capital_gains_tax, calculate_roth_conversion_tax, effective_rate, marginal_rate,
    marginal_rate_in, progressive_breakdown, progressive_tax, state_tax,
};
pub use config::{CalculatorConfig, ConfigError};
pub use error::TaxError;
pub use models::*;
