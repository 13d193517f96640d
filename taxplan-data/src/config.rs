//! TOML configuration file loading.
//!
//! ```toml
//! max_amount = "1000000000.00"
//! state_tax_rate = "0.05"
//! no_income_tax_states = ["AK", "FL", "NV", "SD", "TN", "TX", "WA", "WY", "NH"]
//! ```
//!
//! Missing keys fall back to [`CalculatorConfig::default`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use taxplan_core::{CalculatorConfig, ConfigError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(#[from] ConfigError),
}

/// Parse and validate a configuration document.
pub fn parse_config(contents: &str) -> Result<CalculatorConfig, ConfigLoadError> {
    let config: CalculatorConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<CalculatorConfig, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents)?;

    info!(
        path = %path.display(),
        max_amount = %config.max_amount,
        state_tax_rate = %config.state_tax_rate,
        "Loaded calculator config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), CalculatorConfig::default());
    }

    #[test]
    fn partial_document_overrides_named_keys() {
        let config = parse_config("state_tax_rate = \"0.0725\"\n").unwrap();

        assert_eq!(config.state_tax_rate, dec!(0.0725));
        assert_eq!(config.max_amount, CalculatorConfig::default().max_amount);
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let err = parse_config("state_tax_rate = \"1.5\"\n").unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::Invalid(ConfigError::InvalidStateRate(rate)) if rate == dec!(1.5)
        ));
    }

    #[test]
    fn unknown_state_is_rejected() {
        let err = parse_config("no_income_tax_states = [\"TX\", \"XX\"]\n").unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::Invalid(ConfigError::UnknownNoTaxState(ref code)) if code == "XX"
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_config("state_tax_rate = ").unwrap_err();

        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/taxplan.toml")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/taxplan.toml"));
    }
}
