//! Error types for sales data synthesis and loading.

use thiserror::Error;

/// Result type for SalesDash operations.
pub type Result<T> = std::result::Result<T, SalesError>;

/// Errors that can occur while generating, loading or exporting sales data.
#[derive(Error, Debug)]
pub enum SalesError {
    /// Invalid generator configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record violates the transaction schema.
    #[error("Schema violation at row {row}: {message}")]
    Schema {
        /// 1-based data row (header excluded).
        row: usize,
        /// What was wrong with the row.
        message: String,
    },

    /// CSV reader/writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SalesError {
    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a schema error for the given data row.
    pub fn schema(row: usize, msg: impl Into<String>) -> Self {
        Self::Schema {
            row,
            message: msg.into(),
        }
    }

    /// True for configuration failures.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
