//! Generator configuration from a TOML file plus command-line overrides.
//!
//! ```toml
//! record_count = 20000
//! seed = 7
//! zipf_exponent = 0.8
//!
//! [date_range]
//! start = "2022-01-01"
//! end = "2023-12-31"
//!
//! [category_weights]
//! Electronics = 0.5
//! "Home & Kitchen" = 0.5
//!
//! [seasonality]
//! peak_quarter = 4
//! uplift = 2.0
//! ```
//!
//! Omitted keys keep their defaults; a weight table that is present replaces
//! the default table entirely.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use salesdash::factory::GeneratorConfig;
use tracing::debug;

use crate::error::CliResult;

/// Values given on the command line that win over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--records`
    pub records: Option<usize>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--start`
    pub start: Option<NaiveDate>,
    /// `--end`
    pub end: Option<NaiveDate>,
}

/// Parse a configuration file's contents.
pub fn parse_config(text: &str) -> CliResult<GeneratorConfig> {
    Ok(toml::from_str(text)?)
}

/// Load the file (or defaults) and apply overrides. Validation is left to the generator.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> CliResult<GeneratorConfig> {
    let mut config = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading generator configuration");
            parse_config(&fs::read_to_string(path)?)?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(records) = overrides.records {
        config.record_count = records;
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(start) = overrides.start {
        config.date_range.start = start;
    }
    if let Some(end) = overrides.end {
        config.date_range.end = end;
    }

    Ok(config)
}
