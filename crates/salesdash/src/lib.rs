//! SalesDash - synthetic e-commerce sales data and aggregation.
//!
//! Generates realistic transaction tables and reduces them to the summary
//! tables a sales dashboard is built from.
//!
//! # Features
//!
//! - **Transaction Factory**: Seeded, reproducible synthesis with weighted
//!   categories and regions, a seasonal date density, and a long-tailed
//!   customer pool
//! - **Aggregator**: Revenue by category, region, quarter, month and segment,
//!   customer concentration, repeat-purchase rate and RFM buckets
//! - **Flat Files**: CSV export and schema-checked import
//!
//! # Pipeline
//!
//! ```text
//! GeneratorConfig ──▶ TransactionGenerator ──▶ TransactionTable ──▶ Aggregator ──▶ SalesReport
//!                                                    ▲
//!                                          export::read_csv
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use salesdash::prelude::*;
//!
//! let table = TransactionGenerator::new(GeneratorConfig::default())?.generate();
//! let report = Aggregator::default().summarize(&table);
//! println!("{}", report.metrics.total_revenue_cents);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analytics;
pub mod cleaning;
pub mod error;
pub mod export;
pub mod factory;
pub mod types;

pub use error::{Result, SalesError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        Aggregator, ConcentrationSummary, GroupRevenue, Insights, KeyMetrics, PeriodRevenue,
        RfmSegment, RfmSummary, SalesReport,
    };
    pub use crate::cleaning::{clean, CleaningOptions, CleaningReport};
    pub use crate::error::{Result, SalesError};
    pub use crate::factory::{
        DateRange, GeneratorConfig, SeasonalProfile, TransactionGenerator, WeightTable,
    };
    pub use crate::types::{
        Category, CustomerSegment, Quarter, Region, Transaction, TransactionTable, YearMonth,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
