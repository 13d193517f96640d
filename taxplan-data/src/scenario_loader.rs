//! CSV loader for batches of tax scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column          | Type    | Notes                                         |
//! |-----------------|---------|-----------------------------------------------|
//! | `label`         | string  | Free text shown in reports                    |
//! | `kind`          | string  | `roth` or `gains`                             |
//! | `amount`        | decimal | e.g. `25000.00`                               |
//! | `filing_status` | string  | `S`, `MFJ`, `HOH` (or the long names)         |
//! | `state`         | string  | Two-letter postal code, e.g. `TX`             |
//!
//! ```csv
//! label,kind,amount,filing_status,state
//! fill 10% bracket,roth,11000,S,TX
//! harvest,gains,100000,MFJ,CA
//! ```

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taxplan_core::{FilingStatus, TaxCalculator, TaxError, TaxImpact};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when reading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: unknown scenario kind '{kind}' (expected 'roth' or 'gains')")]
    UnknownKind { row: usize, kind: String },

    #[error("row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },

    #[error("row {row}: {source}")]
    InvalidFilingStatus {
        row: usize,
        #[source]
        source: TaxError,
    },
}

impl From<csv::Error> for ScenarioLoaderError {
    fn from(err: csv::Error) -> Self {
        ScenarioLoaderError::CsvParse(err.to_string())
    }
}

/// Which calculation a scenario runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    RothConversion,
    CapitalGains,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RothConversion => "roth",
            Self::CapitalGains => "gains",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roth" | "roth_conversion" | "conversion" => Ok(Self::RothConversion),
            "gains" | "capital_gains" | "harvest" => Ok(Self::CapitalGains),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    kind: String,
    amount: String,
    filing_status: String,
    state: String,
}

/// One parsed scenario row.
///
/// The amount and state are not validated here; that happens when the row is
/// evaluated so that one bad row does not discard the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioRecord {
    pub label: String,
    pub kind: ScenarioKind,
    pub amount: Decimal,
    pub filing_status: FilingStatus,
    pub state: String,
}

/// A scenario together with its calculated impact or the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub record: ScenarioRecord,
    pub result: Result<TaxImpact, TaxError>,
}

pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse scenario records from a CSV reader.
    ///
    /// Row numbers in errors are 1-based and exclude the header line.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScenarioRecord>, ScenarioLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: CsvRow = result?;
            let row_number = index + 1;

            let kind = row
                .kind
                .parse::<ScenarioKind>()
                .map_err(|kind| ScenarioLoaderError::UnknownKind {
                    row: row_number,
                    kind,
                })?;
            let amount = Decimal::from_str(&row.amount).map_err(|_| {
                ScenarioLoaderError::InvalidAmount {
                    row: row_number,
                    value: row.amount.clone(),
                }
            })?;
            let filing_status = row.filing_status.parse::<FilingStatus>().map_err(|source| {
                ScenarioLoaderError::InvalidFilingStatus {
                    row: row_number,
                    source,
                }
            })?;

            records.push(ScenarioRecord {
                label: row.label,
                kind,
                amount,
                filing_status,
                state: row.state,
            });
        }

        Ok(records)
    }

    /// Evaluate every record with `calculator`, keeping per-row failures.
    pub fn evaluate(
        calculator: &TaxCalculator,
        records: &[ScenarioRecord],
    ) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = records
            .iter()
            .map(|record| {
                let result = match record.kind {
                    ScenarioKind::RothConversion => calculator.roth_conversion_tax(
                        record.amount,
                        record.filing_status,
                        &record.state,
                    ),
                    ScenarioKind::CapitalGains => calculator.capital_gains_tax(
                        record.amount,
                        record.filing_status,
                        &record.state,
                    ),
                };

                if let Err(error) = &result {
                    warn!(label = %record.label, %error, "Scenario failed");
                }

                ScenarioOutcome {
                    record: record.clone(),
                    result,
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            scenarios = outcomes.len(),
            failed, "Evaluated scenario batch"
        );

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"label,kind,amount,filing_status,state
boundary,roth,11000,S,TX
harvest,gains,100000,S,TX
joint,roth,50000.50,MFJ,ny
"#;

    #[test]
    fn parse_reads_all_rows() {
        let records = ScenarioLoader::parse(TEST_CSV.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[2],
            ScenarioRecord {
                label: "joint".to_string(),
                kind: ScenarioKind::RothConversion,
                amount: dec!(50000.50),
                filing_status: FilingStatus::MarriedFilingJointly,
                state: "ny".to_string(),
            }
        );
    }

    #[test]
    fn parse_matches_headers_by_name() {
        let csv = "state,amount,kind,label,filing_status\nFL,2500,gains,reordered,HOH\n";

        let records = ScenarioLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].kind, ScenarioKind::CapitalGains);
        assert_eq!(records[0].filing_status, FilingStatus::HeadOfHousehold);
        assert_eq!(records[0].amount, dec!(2500));
    }

    #[test]
    fn parse_trims_whitespace() {
        let csv = "label,kind,amount,filing_status,state\n spaced , roth , 100 , S , TX \n";

        let records = ScenarioLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].label, "spaced");
        assert_eq!(records[0].amount, dec!(100));
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let csv = "label,kind,amount,filing_status,state\nx,estate,100,S,TX\n";

        let result = ScenarioLoader::parse(csv.as_bytes());

        assert!(matches!(
            result,
            Err(ScenarioLoaderError::UnknownKind { row: 1, ref kind }) if kind == "estate"
        ));
    }

    #[test]
    fn parse_rejects_unknown_filing_status() {
        let csv = "label,kind,amount,filing_status,state\nok,roth,1,S,TX\nbad,roth,1,MFS,TX\n";

        let result = ScenarioLoader::parse(csv.as_bytes());

        assert!(matches!(
            result,
            Err(ScenarioLoaderError::InvalidFilingStatus { row: 2, .. })
        ));
    }

    #[test]
    fn parse_rejects_malformed_amount() {
        let csv = "label,kind,amount,filing_status,state\nx,roth,12k,S,TX\n";

        let result = ScenarioLoader::parse(csv.as_bytes());

        assert!(matches!(
            result,
            Err(ScenarioLoaderError::InvalidAmount { row: 1, ref value }) if value == "12k"
        ));
    }

    #[test]
    fn parse_rejects_missing_column() {
        let csv = "label,kind,amount,state\nx,roth,1,TX\n";

        let result = ScenarioLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(ScenarioLoaderError::CsvParse(_))));
    }

    #[test]
    fn evaluate_keeps_failures_per_row() {
        let csv = "label,kind,amount,filing_status,state\nok,roth,11000,S,TX\nneg,gains,-5,S,TX\nstate,gains,5,S,ZZ\n";
        let records = ScenarioLoader::parse(csv.as_bytes()).unwrap();

        let outcomes = ScenarioLoader::evaluate(&TaxCalculator::default(), &records);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes[0].result.as_ref().map(|impact| impact.federal_tax),
            Ok(dec!(1100.00))
        );
        assert_eq!(outcomes[1].result, Err(TaxError::Negative(dec!(-5))));
        assert_eq!(
            outcomes[2].result,
            Err(TaxError::UnknownStateCode("ZZ".to_string()))
        );
    }
}
