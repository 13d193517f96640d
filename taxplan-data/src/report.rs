//! Text and JSON rendering of scenario results.

use std::fmt::Write;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use taxplan_core::{FilingStatus, TaxImpact};

use crate::scenario_loader::{ScenarioKind, ScenarioOutcome};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    label: &'a str,
    kind: ScenarioKind,
    amount: Decimal,
    filing_status: FilingStatus,
    state: &'a str,
    #[serde(flatten)]
    impact: Option<TaxImpact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a ScenarioOutcome> for ReportRow<'a> {
    fn from(outcome: &'a ScenarioOutcome) -> Self {
        let record = &outcome.record;
        Self {
            label: &record.label,
            kind: record.kind,
            amount: record.amount,
            filing_status: record.filing_status,
            state: &record.state,
            impact: outcome.result.as_ref().ok().copied(),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    scenarios: Vec<ReportRow<'a>>,
    failed: usize,
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).round_dp(4).normalize())
}

/// Render a single scenario.
pub fn render_outcome(
    format: OutputFormat,
    outcome: &ScenarioOutcome,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ReportRow::from(outcome)),
        OutputFormat::Text => Ok(outcome_text(outcome)),
    }
}

/// Render a batch of scenarios, failures included.
pub fn render_batch(
    format: OutputFormat,
    outcomes: &[ScenarioOutcome],
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&BatchReport {
            scenarios: outcomes.iter().map(ReportRow::from).collect(),
            failed: outcomes.iter().filter(|o| o.result.is_err()).count(),
        }),
        OutputFormat::Text => Ok(batch_text(outcomes)),
    }
}

fn outcome_text(outcome: &ScenarioOutcome) -> String {
    let record = &outcome.record;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} of {} ({}, {})",
        match record.kind {
            ScenarioKind::RothConversion => "Roth conversion",
            ScenarioKind::CapitalGains => "Capital gains harvest",
        },
        record.amount,
        record.filing_status.label(),
        record.state.trim().to_ascii_uppercase(),
    );

    match &outcome.result {
        Ok(impact) => {
            for (name, value) in [
                ("Federal tax", impact.federal_tax.to_string()),
                ("State tax", impact.state_tax.to_string()),
                ("Total tax", impact.total_tax.to_string()),
                ("Effective rate", percent(impact.effective_rate)),
            ] {
                let _ = writeln!(out, "  {name:<16}{value:>16}");
            }
        }
        Err(error) => {
            let _ = writeln!(out, "  error: {error}");
        }
    }

    out
}

fn batch_text(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<20} {:<6} {:>14} {:<4} {:<5} {:>12} {:>12} {:>12} {:>10}",
        "label", "kind", "amount", "fs", "state", "federal", "state tax", "total", "effective"
    );

    for outcome in outcomes {
        let record = &outcome.record;
        let _ = write!(
            out,
            "{:<20} {:<6} {:>14} {:<4} {:<5} ",
            record.label,
            record.kind.as_str(),
            record.amount.to_string(),
            record.filing_status.as_str(),
            record.state,
        );

        match &outcome.result {
            Ok(impact) => {
                let _ = writeln!(
                    out,
                    "{:>12} {:>12} {:>12} {:>10}",
                    impact.federal_tax.to_string(),
                    impact.state_tax.to_string(),
                    impact.total_tax.to_string(),
                    percent(impact.effective_rate),
                );
            }
            Err(error) => {
                let _ = writeln!(out, "error: {error}");
            }
        }
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let _ = writeln!(out, "{} scenarios, {} failed", outcomes.len(), failed);

    out
}
