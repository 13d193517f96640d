//! Compiled-in bracket tables (tax year 2023) and the per-status schedule.
//!
//! | Status | Ordinary tiers (upper bound → rate)                                                                   |
//! |--------|--------------------------------------------------------------------------------------------------------|
//! | S      | 11,000 → 10%, 44,725 → 12%, 95,375 → 22%, 182,100 → 24%, 231,250 → 32%, 578,125 → 35%, above → 37%  |
//! | MFJ    | 22,000 → 10%, 89,450 → 12%, 190,750 → 22%, 364,200 → 24%, 462,500 → 32%, 693,750 → 35%, above → 37% |
//! | HOH    | 15,700 → 10%, 59,850 → 12%, 95,350 → 22%, 182,100 → 24%, 231,250 → 32%, 578,100 → 35%, above → 37%  |
//!
//! | Status | Long-term capital-gains tiers                       |
//! |--------|-----------------------------------------------------|
//! | S      | 44,625 → 0%, 492,300 → 15%, above → 20%             |
//! | MFJ    | 89,250 → 0%, 553,850 → 15%, above → 20%             |
//! | HOH    | 59,750 → 0%, 523,050 → 15%, above → 20%             |

use rust_decimal_macros::dec;

use crate::models::{BracketKind, BracketTable, BracketTier, FilingStatus};

pub static FEDERAL_SINGLE: [BracketTier; 7] = [
    BracketTier::bounded(dec!(11000), dec!(0.10)),
    BracketTier::bounded(dec!(44725), dec!(0.12)),
    BracketTier::bounded(dec!(95375), dec!(0.22)),
    BracketTier::bounded(dec!(182100), dec!(0.24)),
    BracketTier::bounded(dec!(231250), dec!(0.32)),
    BracketTier::bounded(dec!(578125), dec!(0.35)),
    BracketTier::unbounded(dec!(0.37)),
];

pub static FEDERAL_MARRIED_FILING_JOINTLY: [BracketTier; 7] = [
    BracketTier::bounded(dec!(22000), dec!(0.10)),
    BracketTier::bounded(dec!(89450), dec!(0.12)),
    BracketTier::bounded(dec!(190750), dec!(0.22)),
    BracketTier::bounded(dec!(364200), dec!(0.24)),
    BracketTier::bounded(dec!(462500), dec!(0.32)),
    BracketTier::bounded(dec!(693750), dec!(0.35)),
    BracketTier::unbounded(dec!(0.37)),
];

pub static FEDERAL_HEAD_OF_HOUSEHOLD: [BracketTier; 7] = [
    BracketTier::bounded(dec!(15700), dec!(0.10)),
    BracketTier::bounded(dec!(59850), dec!(0.12)),
    BracketTier::bounded(dec!(95350), dec!(0.22)),
    BracketTier::bounded(dec!(182100), dec!(0.24)),
    BracketTier::bounded(dec!(231250), dec!(0.32)),
    BracketTier::bounded(dec!(578100), dec!(0.35)),
    BracketTier::unbounded(dec!(0.37)),
];

pub static CAPITAL_GAINS_SINGLE: [BracketTier; 3] = [
    BracketTier::bounded(dec!(44625), dec!(0)),
    BracketTier::bounded(dec!(492300), dec!(0.15)),
    BracketTier::unbounded(dec!(0.20)),
];

pub static CAPITAL_GAINS_MARRIED_FILING_JOINTLY: [BracketTier; 3] = [
    BracketTier::bounded(dec!(89250), dec!(0)),
    BracketTier::bounded(dec!(553850), dec!(0.15)),
    BracketTier::unbounded(dec!(0.20)),
];

pub static CAPITAL_GAINS_HEAD_OF_HOUSEHOLD: [BracketTier; 3] = [
    BracketTier::bounded(dec!(59750), dec!(0)),
    BracketTier::bounded(dec!(523050), dec!(0.15)),
    BracketTier::unbounded(dec!(0.20)),
];

/// Ordinary-income brackets for `status`.
pub fn federal_brackets(status: FilingStatus) -> &'static [BracketTier] {
    match status {
        FilingStatus::Single => &FEDERAL_SINGLE,
        FilingStatus::MarriedFilingJointly => &FEDERAL_MARRIED_FILING_JOINTLY,
        FilingStatus::HeadOfHousehold => &FEDERAL_HEAD_OF_HOUSEHOLD,
    }
}

/// Long-term capital-gains brackets for `status`.
pub fn capital_gains_brackets(status: FilingStatus) -> &'static [BracketTier] {
    match status {
        FilingStatus::Single => &CAPITAL_GAINS_SINGLE,
        FilingStatus::MarriedFilingJointly => &CAPITAL_GAINS_MARRIED_FILING_JOINTLY,
        FilingStatus::HeadOfHousehold => &CAPITAL_GAINS_HEAD_OF_HOUSEHOLD,
    }
}

/// One table per filing status.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusTables {
    single: BracketTable,
    married_filing_jointly: BracketTable,
    head_of_household: BracketTable,
}

impl StatusTables {
    fn from_static(lookup: fn(FilingStatus) -> &'static [BracketTier]) -> Self {
        Self {
            single: BracketTable::from_static(lookup(FilingStatus::Single)),
            married_filing_jointly: BracketTable::from_static(lookup(
                FilingStatus::MarriedFilingJointly,
            )),
            head_of_household: BracketTable::from_static(lookup(FilingStatus::HeadOfHousehold)),
        }
    }

    fn get(
        &self,
        status: FilingStatus,
    ) -> &BracketTable {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    fn get_mut(
        &mut self,
        status: FilingStatus,
    ) -> &mut BracketTable {
        match status {
            FilingStatus::Single => &mut self.single,
            FilingStatus::MarriedFilingJointly => &mut self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &mut self.head_of_household,
        }
    }
}

/// The ordinary and capital-gains tables a calculator works from.
///
/// The default schedule borrows the compiled-in tables. Individual tables can
/// be swapped for validated custom ones with [`BracketSchedule::with_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSchedule {
    ordinary: StatusTables,
    capital_gains: StatusTables,
}

impl BracketSchedule {
    pub fn ordinary(
        &self,
        status: FilingStatus,
    ) -> &BracketTable {
        self.ordinary.get(status)
    }

    pub fn capital_gains(
        &self,
        status: FilingStatus,
    ) -> &BracketTable {
        self.capital_gains.get(status)
    }

    pub fn table(
        &self,
        kind: BracketKind,
        status: FilingStatus,
    ) -> &BracketTable {
        match kind {
            BracketKind::Ordinary => self.ordinary(status),
            BracketKind::CapitalGains => self.capital_gains(status),
        }
    }

    /// Replaces the table used for `kind` and `status`.
    pub fn with_table(
        mut self,
        kind: BracketKind,
        status: FilingStatus,
        table: BracketTable,
    ) -> Self {
        let slot = match kind {
            BracketKind::Ordinary => self.ordinary.get_mut(status),
            BracketKind::CapitalGains => self.capital_gains.get_mut(status),
        };
        *slot = table;
        self
    }
}

impl Default for BracketSchedule {
    fn default() -> Self {
        Self {
            ordinary: StatusTables::from_static(federal_brackets),
            capital_gains: StatusTables::from_static(capital_gains_brackets),
        }
    }
}
