use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use taxplan_core::{BracketSchedule, CalculatorConfig, FilingStatus, TaxCalculator};
use taxplan_data::{
    BracketTableLoader, OutputFormat, ScenarioKind, ScenarioLoader, ScenarioOutcome,
    ScenarioRecord, init_logging, load_config, render_batch, render_outcome,
};
use tracing::info;

/// Estimate federal and state tax for Roth conversions and capital-gains harvests.
#[derive(Parser, Debug)]
#[command(name = "taxplan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML file overriding the maximum amount, state rate and no-tax states
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// CSV file with custom bracket tables (kind,filing_status,upper_bound,rate)
    #[arg(short, long, global = true)]
    brackets: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tax owed on converting a traditional balance to Roth
    Roth(ScenarioArgs),

    /// Tax owed on realizing long-term capital gains
    Gains(ScenarioArgs),

    /// Evaluate every scenario in a CSV file (label,kind,amount,filing_status,state)
    Batch {
        /// Path to the scenarios CSV file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Amount converted or realized, e.g. 25000.00
    #[arg(allow_hyphen_values = true)]
    amount: Decimal,

    /// Filing status: S, MFJ or HOH
    #[arg(short = 's', long, default_value = "S")]
    filing_status: FilingStatus,

    /// Two-letter state postal code, e.g. TX
    #[arg(long)]
    state: String,
}

fn build_calculator(cli: &Cli) -> Result<TaxCalculator> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    let schedule = match &cli.brackets {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            let records = BracketTableLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
            info!(path = %path.display(), tiers = records.len(), "Loaded bracket tiers");
            BracketTableLoader::build_schedule(&records)
                .with_context(|| format!("Invalid bracket tables in: {}", path.display()))?
        }
        None => BracketSchedule::default(),
    };

    let calculator = TaxCalculator::new(&config).context("Invalid calculator config")?;
    Ok(calculator.with_schedule(schedule))
}

fn run_scenario(
    calculator: &TaxCalculator,
    kind: ScenarioKind,
    args: ScenarioArgs,
    format: OutputFormat,
) -> Result<()> {
    let impact = match kind {
        ScenarioKind::RothConversion => {
            calculator.roth_conversion_tax(args.amount, args.filing_status, &args.state)
        }
        ScenarioKind::CapitalGains => {
            calculator.capital_gains_tax(args.amount, args.filing_status, &args.state)
        }
    }
    .with_context(|| format!("{} scenario rejected", kind.as_str()))?;

    let outcome = ScenarioOutcome {
        record: ScenarioRecord {
            label: kind.as_str().to_string(),
            kind,
            amount: args.amount,
            filing_status: args.filing_status,
            state: args.state,
        },
        result: Ok(impact),
    };

    print!("{}", render_outcome(format, &outcome)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn run_batch(
    calculator: &TaxCalculator,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let reader =
        File::open(file).with_context(|| format!("Failed to open: {}", file.display()))?;
    let records = ScenarioLoader::parse(reader)
        .with_context(|| format!("Failed to parse CSV: {}", file.display()))?;

    let outcomes = ScenarioLoader::evaluate(calculator, &records);

    print!("{}", render_batch(format, &outcomes)?);
    if format == OutputFormat::Json {
        println!();
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        bail!("{failed} of {} scenarios failed", outcomes.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let calculator = build_calculator(&cli)?;
    let format = cli.format;

    match cli.command {
        Command::Roth(args) => {
            run_scenario(&calculator, ScenarioKind::RothConversion, args, format)
        }
        Command::Gains(args) => run_scenario(&calculator, ScenarioKind::CapitalGains, args, format),
        Command::Batch { file } => run_batch(&calculator, &file, format),
    }
}
