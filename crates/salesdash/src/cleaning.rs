//! Pre-aggregation cleaning: duplicate order ids and revenue outliers.
//!
//! Cleaning works on raw records, which may still repeat order ids, and
//! returns a fresh table plus a report of what was dropped.

use crate::error::Result;
use crate::types::{Transaction, TransactionTable};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// What the cleaning pass should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleaningOptions {
    /// Drop rows with revenue above this quantile of the revenue column
    /// (e.g. 0.99). `None` keeps every row.
    pub outlier_quantile: Option<f64>,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            outlier_quantile: Some(0.99),
        }
    }
}

/// Row counts before and after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    /// Rows in the input.
    pub input_rows: usize,
    /// Rows dropped as repeated order ids.
    pub duplicates_removed: usize,
    /// Revenue cut-off used, in cents.
    pub outlier_threshold_cents: Option<f64>,
    /// Rows dropped as outliers.
    pub outliers_removed: usize,
    /// Rows kept.
    pub output_rows: usize,
}

/// Remove duplicate order ids (first occurrence wins), then revenue outliers.
///
/// Fails with a schema error if the kept rows' revenue total overflows.
pub fn clean(
    records: &[Transaction],
    options: &CleaningOptions,
) -> Result<(TransactionTable, CleaningReport)> {
    let mut seen = HashSet::with_capacity(records.len());
    let deduped: Vec<Transaction> = records
        .iter()
        .filter(|t| seen.insert(t.order_id()))
        .copied()
        .collect();
    let duplicates_removed = records.len() - deduped.len();

    let threshold = options.outlier_quantile.and_then(|q| {
        let mut revenue: Vec<u64> = deduped.iter().map(|t| t.revenue_cents()).collect();
        revenue.sort_unstable();
        quantile(&revenue, q)
    });

    let deduped_rows = deduped.len();
    let kept: Vec<Transaction> = match threshold {
        Some(limit) => deduped
            .into_iter()
            .filter(|t| t.revenue_cents() as f64 <= limit)
            .collect(),
        None => deduped,
    };

    let report = CleaningReport {
        input_rows: records.len(),
        duplicates_removed,
        outlier_threshold_cents: threshold,
        outliers_removed: deduped_rows - kept.len(),
        output_rows: kept.len(),
    };
    let table = TransactionTable::try_from_records(kept)?;
    info!(
        input = report.input_rows,
        duplicates = report.duplicates_removed,
        outliers = report.outliers_removed,
        output = report.output_rows,
        "Cleaning complete"
    );

    Ok((table, report))
}

/// Linear-interpolated quantile of sorted values; `None` for empty input.
pub fn quantile(sorted: &[u64], q: f64) -> Option<f64> {
    if sorted.is_empty() || q.is_nan() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] as f64 + (sorted[upper] as f64 - sorted[lower] as f64) * frac)
}
