//! File-based driver around `taxplan-core`: CSV scenario batches, custom
//! bracket tables, TOML configuration and report rendering.

pub mod bracket_loader;
pub mod config;
pub mod logging;
pub mod report;
pub mod scenario_loader;

pub use bracket_loader::{BracketTableLoader, BracketTableLoaderError, BracketTierRecord};
pub use config::{ConfigLoadError, load_config, parse_config};
pub use logging::init_logging;
pub use report::{OutputFormat, render_batch, render_outcome};
pub use scenario_loader::{
    ScenarioKind, ScenarioLoader, ScenarioLoaderError, ScenarioOutcome, ScenarioRecord,
};
