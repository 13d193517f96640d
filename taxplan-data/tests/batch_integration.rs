//! Integration tests for batch evaluation with file-based inputs.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxplan_core::{BracketKind, FilingStatus, TaxCalculator, TaxError, TaxImpact};
use taxplan_data::{
    BracketTableLoader, BracketTableLoaderError, OutputFormat, ScenarioLoader, parse_config,
    render_batch,
};

const SCENARIOS_CSV: &str = include_str!("../test-data/scenarios.csv");
const BRACKETS_2024_CSV: &str = include_str!("../test-data/brackets_2024.csv");
const CONFIG_TOML: &str = include_str!("../test-data/taxplan.toml");

fn federal_by_label(
    calculator: &TaxCalculator,
    csv: &str,
) -> Vec<(String, Decimal)> {
    let records = ScenarioLoader::parse(csv.as_bytes()).expect("Failed to parse scenarios");
    ScenarioLoader::evaluate(calculator, &records)
        .into_iter()
        .map(|outcome| {
            let federal = outcome.result.expect("Scenario should succeed").federal_tax;
            (outcome.record.label, federal)
        })
        .collect()
}

// =============================================================================
// Default tables
// =============================================================================

#[test]
fn test_batch_with_default_tables() {
    let results = federal_by_label(&TaxCalculator::default(), SCENARIOS_CSV);

    assert_eq!(
        results,
        vec![
            ("boundary conversion".to_string(), dec!(1100.00)),
            ("harvest".to_string(), dec!(8306.25)),
            ("joint harvest".to_string(), dec!(1612.50)),
            ("hoh conversion".to_string(), dec!(6000.00)),
            ("large harvest".to_string(), dec!(154457.50)),
        ]
    );
}

#[test]
fn test_batch_impacts_include_state_tax() {
    let records = ScenarioLoader::parse(SCENARIOS_CSV.as_bytes()).unwrap();

    let outcomes = ScenarioLoader::evaluate(&TaxCalculator::default(), &records);

    assert_eq!(
        outcomes[2].result,
        Ok(TaxImpact {
            federal_tax: dec!(1612.50),
            state_tax: dec!(5000.00),
            total_tax: dec!(6612.50),
            effective_rate: dec!(0.066125),
        })
    );
    assert_eq!(
        outcomes[3].result,
        Ok(TaxImpact {
            federal_tax: dec!(6000.00),
            state_tax: dec!(2500.00),
            total_tax: dec!(8500.00),
            effective_rate: dec!(0.17),
        })
    );
}

// =============================================================================
// Custom tables and config
// =============================================================================

#[test]
fn test_all_2024_tables_load() {
    let records = BracketTableLoader::parse(BRACKETS_2024_CSV.as_bytes()).unwrap();

    let schedule = BracketTableLoader::build_schedule(&records).unwrap();

    assert_eq!(records.len(), 30);
    for status in FilingStatus::ALL {
        assert_eq!(schedule.table(BracketKind::Ordinary, status).tiers().len(), 7);
        assert_eq!(schedule.table(BracketKind::CapitalGains, status).tiers().len(), 3);
    }
}

#[test]
fn test_batch_with_2024_tables() {
    let records = BracketTableLoader::parse(BRACKETS_2024_CSV.as_bytes()).unwrap();
    let schedule = BracketTableLoader::build_schedule(&records).unwrap();
    let calculator = TaxCalculator::default().with_schedule(schedule);

    let results = federal_by_label(&calculator, SCENARIOS_CSV);

    assert_eq!(
        results,
        vec![
            ("boundary conversion".to_string(), dec!(1100.00)),
            // 0.15 * (100000 - 47025)
            ("harvest".to_string(), dec!(7946.25)),
            // 0.15 * (100000 - 94050)
            ("joint harvest".to_string(), dec!(892.50)),
            ("hoh conversion".to_string(), dec!(6000.00)),
            // 0.15 * 583750 + 0.20 * (1000000 - 94050 - 583750)
            ("large harvest".to_string(), dec!(152002.50)),
        ]
    );
}

#[test]
fn test_batch_with_config_file() {
    let config = parse_config(CONFIG_TOML).unwrap();
    let calculator = TaxCalculator::new(&config).unwrap();
    let records = ScenarioLoader::parse(SCENARIOS_CSV.as_bytes()).unwrap();

    let outcomes = ScenarioLoader::evaluate(&calculator, &records);
    let state_taxes: Vec<Decimal> = outcomes
        .iter()
        .map(|outcome| outcome.result.as_ref().unwrap().state_tax)
        .collect();

    assert_eq!(
        state_taxes,
        vec![dec!(0), dec!(0), dec!(4250.00), dec!(2125.00), dec!(0)]
    );
}

#[test]
fn test_config_maximum_rejects_large_row() {
    let config = parse_config(CONFIG_TOML).unwrap();
    let calculator = TaxCalculator::new(&config).unwrap();
    let csv = "label,kind,amount,filing_status,state\nwindfall,gains,5000000.01,S,TX\n";
    let records = ScenarioLoader::parse(csv.as_bytes()).unwrap();

    let outcomes = ScenarioLoader::evaluate(&calculator, &records);

    assert_eq!(
        outcomes[0].result,
        Err(TaxError::ExceedsMaximum {
            amount: dec!(5000000.01),
            maximum: dec!(5000000.00),
        })
    );
}

#[test]
fn test_table_missing_top_tier_is_rejected() {
    let truncated: String = BRACKETS_2024_CSV
        .lines()
        .filter(|line| *line != "capital_gains,MFJ,,0.20")
        .map(|line| format!("{line}\n"))
        .collect();
    let records = BracketTableLoader::parse(truncated.as_bytes()).unwrap();

    let err = BracketTableLoader::build_schedule(&records).unwrap_err();

    assert!(matches!(
        err,
        BracketTableLoaderError::InvalidTable {
            kind: BracketKind::CapitalGains,
            status: FilingStatus::MarriedFilingJointly,
            ..
        }
    ));
}

// =============================================================================
// Mixed batches
// =============================================================================

#[test]
fn test_failed_rows_do_not_abort_batch() {
    let csv = format!("{SCENARIOS_CSV}negative,roth,-100,S,TX\nnowhere,gains,100,S,ZZ\n");
    let records = ScenarioLoader::parse(csv.as_bytes()).unwrap();

    let outcomes = ScenarioLoader::evaluate(&TaxCalculator::default(), &records);
    let report = render_batch(OutputFormat::Text, &outcomes).unwrap();

    assert_eq!(outcomes.len(), 7);
    assert_eq!(outcomes.iter().filter(|o| o.result.is_ok()).count(), 5);
    assert_eq!(outcomes[5].result, Err(TaxError::Negative(dec!(-100))));
    assert_eq!(
        outcomes[6].result,
        Err(TaxError::UnknownStateCode("ZZ".to_string()))
    );
    assert!(report.ends_with("7 scenarios, 2 failed\n"));
}
