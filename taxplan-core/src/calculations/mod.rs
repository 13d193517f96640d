//! Tax calculations for Roth conversion and capital-gains scenarios.
//!
//! Bottom-up: bracket tables, amount validation, marginal rate lookup,
//! progressive accumulation, state adjustment, effective rate, and the two
//! orchestrators on [`TaxCalculator`].

pub mod brackets;
pub mod calculator;
pub mod capital_gains;
pub mod common;
pub mod effective_rate;
pub mod marginal;
pub mod progressive;
pub mod roth_conversion;
pub mod state;
pub mod validation;

pub use brackets::BracketSchedule;
pub use calculator::TaxCalculator;
pub use capital_gains::calculate_capital_gains_tax;
pub use effective_rate::effective_rate;
pub use marginal::{marginal_rate, marginal_rate_in};
pub use progressive::{TierSlice, progressive_breakdown, progressive_tax};
pub use roth_conversion::calculate_roth_conversion_tax;
pub use state::{StateTaxRules, state_tax};
pub use validation::AmountValidator;
