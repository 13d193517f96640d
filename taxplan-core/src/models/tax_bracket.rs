use std::borrow::Cow;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One slice of a progressive table: a rate that applies up to `upper_bound`.
///
/// `upper_bound` of `None` means the tier is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTier {
    pub rate: Decimal,
    pub upper_bound: Option<Decimal>,
}

impl BracketTier {
    pub const fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            rate,
            upper_bound: Some(upper_bound),
        }
    }

    pub const fn unbounded(rate: Decimal) -> Self {
        Self {
            rate,
            upper_bound: None,
        }
    }

    /// Whether `income` falls at or below this tier's upper bound.
    pub fn covers(
        &self,
        income: Decimal,
    ) -> bool {
        self.upper_bound.is_none_or(|upper| income <= upper)
    }
}

/// Which family of rates a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketKind {
    /// Ordinary income; used for Roth conversions.
    Ordinary,
    /// Long-term capital gains.
    CapitalGains,
}

impl BracketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ordinary => "ordinary",
            Self::CapitalGains => "capital_gains",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordinary" | "federal" => Some(Self::Ordinary),
            "capital_gains" | "capital-gains" | "ltcg" => Some(Self::CapitalGains),
            _ => None,
        }
    }
}

impl fmt::Display for BracketKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a sequence of tiers is not a usable bracket table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table has no tiers")]
    Empty,

    #[error("tier {index} upper bound {upper_bound} must exceed the previous bound {previous}")]
    NotAscending {
        index: usize,
        upper_bound: Decimal,
        previous: Decimal,
    },

    #[error("the final tier must be unbounded")]
    BoundedFinalTier,

    #[error("tier {0} is unbounded but is not the final tier")]
    UnboundedInnerTier(usize),

    #[error("tier {index} rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { index: usize, rate: Decimal },
}

/// An ordered, contiguous, exhaustive set of tiers.
///
/// Bounds are strictly increasing from zero and the last tier is unbounded,
/// so every non-negative income is covered by exactly one first-matching tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    tiers: Cow<'static, [BracketTier]>,
}

impl BracketTable {
    /// Builds a table after checking ordering, rates, and the unbounded final tier.
    pub fn new(tiers: Vec<BracketTier>) -> Result<Self, BracketTableError> {
        Self::check(&tiers)?;
        Ok(Self {
            tiers: Cow::Owned(tiers),
        })
    }

    /// Wraps one of the compiled-in tables without copying it.
    pub(crate) const fn from_static(tiers: &'static [BracketTier]) -> Self {
        Self {
            tiers: Cow::Borrowed(tiers),
        }
    }

    pub fn tiers(&self) -> &[BracketTier] {
        &self.tiers
    }

    fn check(tiers: &[BracketTier]) -> Result<(), BracketTableError> {
        let last = tiers.len().checked_sub(1).ok_or(BracketTableError::Empty)?;
        let mut previous = Decimal::ZERO;

        for (index, tier) in tiers.iter().enumerate() {
            if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange {
                    index,
                    rate: tier.rate,
                });
            }

            match tier.upper_bound {
                Some(_) if index == last => return Err(BracketTableError::BoundedFinalTier),
                Some(upper_bound) if upper_bound <= previous => {
                    return Err(BracketTableError::NotAscending {
                        index,
                        upper_bound,
                        previous,
                    });
                }
                Some(upper_bound) => previous = upper_bound,
                None if index != last => return Err(BracketTableError::UnboundedInnerTier(index)),
                None => {}
            }
        }

        Ok(())
    }
}
