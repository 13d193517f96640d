mod amount;
mod filing_status;
mod state_policy;
mod tax_bracket;
mod tax_impact;

pub use amount::RawAmount;
pub use filing_status::FilingStatus;
pub use state_policy::StateTaxPolicy;
pub use tax_bracket::{BracketKind, BracketTable, BracketTableError, BracketTier};
pub use tax_impact::TaxImpact;
