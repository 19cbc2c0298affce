//! Error types for the SalesDash CLI.

use thiserror::Error;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Error, Debug)]
pub enum CliError {
    /// Synthesis, import or export failure.
    #[error(transparent)]
    Sales(#[from] salesdash::SalesError),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Command-line value out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// True when the failure came from configuration rather than IO.
    pub fn is_config(&self) -> bool {
        match self {
            CliError::Sales(e) => e.is_config(),
            CliError::Config(_) | CliError::InvalidArgument(_) => true,
            _ => false,
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}
