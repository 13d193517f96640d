//! CSV loader for custom bracket tables.
//!
//! Each row is one tier. Rows are grouped by `(kind, filing_status)` and kept
//! in file order, so tiers for a table must be listed lowest bound first.
//! Tables not mentioned in the file keep their compiled-in values.
//!
//! ```csv
//! kind,filing_status,upper_bound,rate
//! capital_gains,S,47025,0
//! capital_gains,S,518900,0.15
//! capital_gains,S,,0.20
//! ```

use std::collections::HashMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxplan_core::{
    BracketKind, BracketSchedule, BracketTable, BracketTableError, BracketTier, FilingStatus,
    TaxError,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading bracket tables.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: unknown bracket kind '{kind}' (expected 'ordinary' or 'capital_gains')")]
    InvalidKind { row: usize, kind: String },

    #[error("row {row}: {source}")]
    InvalidFilingStatus {
        row: usize,
        #[source]
        source: TaxError,
    },

    #[error("invalid {kind} table for {status}: {source}")]
    InvalidTable {
        kind: BracketKind,
        status: FilingStatus,
        #[source]
        source: BracketTableError,
    },
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    kind: String,
    filing_status: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    rate: Decimal,
}

/// A single tier read from the brackets CSV file.
///
/// - `kind`: `ordinary` or `capital_gains`
/// - `filing_status`: `S`, `MFJ` or `HOH`
/// - `upper_bound`: inclusive upper bound (empty for the unbounded top tier)
/// - `rate`: the tier rate as a fraction (e.g., 0.15 for 15%)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTierRecord {
    pub kind: BracketKind,
    pub filing_status: FilingStatus,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables from CSV files.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse tier records from a CSV reader.
    ///
    /// Table shape is not checked here; see [`BracketTableLoader::build_schedule`].
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketTierRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: CsvRow = result?;
            let row_number = index + 1;

            let kind = BracketKind::parse(&row.kind).ok_or_else(|| {
                BracketTableLoaderError::InvalidKind {
                    row: row_number,
                    kind: row.kind.clone(),
                }
            })?;
            let filing_status = row.filing_status.parse::<FilingStatus>().map_err(|source| {
                BracketTableLoaderError::InvalidFilingStatus {
                    row: row_number,
                    source,
                }
            })?;

            records.push(BracketTierRecord {
                kind,
                filing_status,
                upper_bound: row.upper_bound,
                rate: row.rate,
            });
        }

        Ok(records)
    }

    /// Build a schedule that overrides the compiled-in tables with `records`.
    ///
    /// Every `(kind, filing_status)` group must form a valid table: bounds
    /// strictly ascending, rates within 0..=1 and an unbounded final tier.
    pub fn build_schedule(
        records: &[BracketTierRecord]
    ) -> Result<BracketSchedule, BracketTableLoaderError> {
        // Group records by (kind, status), preserving file order within a group
        let mut groups: HashMap<(BracketKind, FilingStatus), Vec<BracketTier>> = HashMap::new();

        for record in records {
            groups
                .entry((record.kind, record.filing_status))
                .or_default()
                .push(BracketTier {
                    rate: record.rate,
                    upper_bound: record.upper_bound,
                });
        }

        let mut schedule = BracketSchedule::default();

        for ((kind, status), tiers) in groups {
            let tier_count = tiers.len();
            let table = BracketTable::new(tiers).map_err(|source| {
                BracketTableLoaderError::InvalidTable {
                    kind,
                    status,
                    source,
                }
            })?;

            debug!(%kind, %status, tiers = tier_count, "Loaded custom bracket table");
            schedule = schedule.with_table(kind, status, table);
        }

        Ok(schedule)
    }
}
