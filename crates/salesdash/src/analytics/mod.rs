//! Aggregation of a transaction table into dashboard summary tables.
//!
//! Every summary is a pure function of the input table. An empty table is a
//! valid input and produces zero-valued summaries.

mod customers;
mod metrics;
mod revenue;
mod rfm;

pub use customers::{
    concentration, customer_totals, ranked_customers, repeat_purchase_rate,
    ConcentrationSummary, CustomerTotals, RankedCustomer,
};
pub use metrics::{Insights, KeyMetrics};
pub use revenue::{
    category_region_matrix, revenue_by, revenue_by_period, CategoryRegionRow, GroupRevenue,
    PeriodRevenue,
};
pub use rfm::{rfm_summary, score_customers, RfmBucket, RfmScore, RfmSegment, RfmSummary};

use crate::types::{Category, CustomerSegment, Quarter, Region, TransactionTable, YearMonth};
use serde::Serialize;
use tracing::{debug, warn};

/// Default top-customer fraction for concentration.
pub const DEFAULT_TOP_FRACTION: f64 = 0.20;

/// All summary tables for one transaction table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    /// True when the input table was empty.
    pub degenerate: bool,
    /// Headline numbers.
    pub metrics: KeyMetrics,
    /// Revenue by category, descending.
    pub by_category: Vec<GroupRevenue<Category>>,
    /// Revenue by region, descending.
    pub by_region: Vec<GroupRevenue<Region>>,
    /// Revenue by customer segment, descending.
    pub by_segment: Vec<GroupRevenue<CustomerSegment>>,
    /// Revenue by calendar quarter, chronological.
    pub by_quarter: Vec<PeriodRevenue<Quarter>>,
    /// Revenue by calendar month, chronological.
    pub by_month: Vec<PeriodRevenue<YearMonth>>,
    /// Category x region revenue.
    pub category_region: Vec<CategoryRegionRow>,
    /// Top-customer revenue concentration.
    pub concentration: ConcentrationSummary,
    /// Fraction of distinct customers with more than one order.
    pub repeat_purchase_rate: f64,
    /// RFM buckets.
    pub rfm: RfmSummary,
    /// Derived answers.
    pub insights: Insights,
}

/// Computes a [`SalesReport`] from a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregator {
    top_fraction: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            top_fraction: DEFAULT_TOP_FRACTION,
        }
    }
}

impl Aggregator {
    /// Use a different top-customer fraction; clamped to `[0, 1]`, NaN falls back to the default.
    pub fn with_top_fraction(top_fraction: f64) -> Self {
        let top_fraction = if top_fraction.is_nan() {
            DEFAULT_TOP_FRACTION
        } else {
            top_fraction.clamp(0.0, 1.0)
        };
        Self { top_fraction }
    }

    /// Top-customer fraction in use.
    pub fn top_fraction(&self) -> f64 {
        self.top_fraction
    }

    /// Compute every summary table.
    pub fn summarize(&self, table: &TransactionTable) -> SalesReport {
        let degenerate = table.is_empty();
        if degenerate {
            warn!("Aggregating an empty transaction table; all summaries are zero");
        }

        let customers = customer_totals(table);
        let by_category = revenue_by(table, &Category::ALL, |t| t.category());
        let by_region = revenue_by(table, &Region::ALL, |t| t.region());
        let by_segment = revenue_by(table, &CustomerSegment::ALL, |t| t.segment());
        let by_quarter = revenue_by_period(table, |t| t.quarter());
        let by_month = revenue_by_period(table, |t| t.month());
        let concentration = concentration(&customers, self.top_fraction);
        let repeat_purchase_rate = repeat_purchase_rate(&customers);
        let insights = Insights::derive(
            &by_category,
            &by_region,
            &by_month,
            repeat_purchase_rate,
            &concentration,
        );

        debug!(
            orders = table.len(),
            customers = customers.len(),
            quarters = by_quarter.len(),
            "Summaries computed"
        );

        SalesReport {
            degenerate,
            metrics: KeyMetrics::compute(table, &customers),
            by_category,
            by_region,
            by_segment,
            by_quarter,
            by_month,
            category_region: category_region_matrix(table),
            concentration,
            repeat_purchase_rate,
            rfm: rfm_summary(&customers),
            insights,
        }
    }
}

/// `num / den`, or 0.0 when the denominator is zero.
pub(crate) fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{GeneratorConfig, TransactionGenerator};

    #[test]
    fn test_empty_table_is_degenerate_not_error() {
        let report = Aggregator::default().summarize(&TransactionTable::empty());
        assert!(report.degenerate);
        assert_eq!(report.metrics.total_revenue_cents, 0);
        assert_eq!(report.repeat_purchase_rate, 0.0);
        assert!(!report.repeat_purchase_rate.is_nan());
        assert!(report.by_category.iter().all(|r| r.revenue_cents == 0));
        assert!(report.by_region.iter().all(|r| r.revenue_cents == 0));
        assert!(report.by_quarter.is_empty());
        assert_eq!(report.concentration.top_share, 0.0);
        assert_eq!(report.insights.top_category, None);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let config = GeneratorConfig::default()
            .with_records(3_000)
            .with_customer_pool(500);
        let table = TransactionGenerator::new(config).unwrap().generate();
        let aggregator = Aggregator::default();
        assert_eq!(aggregator.summarize(&table), aggregator.summarize(&table));
    }

    #[test]
    fn test_totals_agree_across_groupings() {
        let config = GeneratorConfig::default().with_records(1_500);
        let table = TransactionGenerator::new(config).unwrap().generate();
        let report = Aggregator::default().summarize(&table);
        let total = report.metrics.total_revenue_cents;
        let sum = |v: Vec<u64>| v.into_iter().sum::<u64>();

        assert_eq!(sum(report.by_category.iter().map(|r| r.revenue_cents).collect()), total);
        assert_eq!(sum(report.by_region.iter().map(|r| r.revenue_cents).collect()), total);
        assert_eq!(sum(report.by_segment.iter().map(|r| r.revenue_cents).collect()), total);
        assert_eq!(sum(report.by_quarter.iter().map(|r| r.revenue_cents).collect()), total);
        assert_eq!(sum(report.by_month.iter().map(|r| r.revenue_cents).collect()), total);
        assert_eq!(
            sum(report
                .category_region
                .iter()
                .flat_map(|r| r.revenue_cents.iter().copied())
                .collect()),
            total
        );
        assert_eq!(sum(report.rfm.buckets.iter().map(|b| b.revenue_cents).collect()), total);
    }

    #[test]
    fn test_top_fraction_clamped() {
        assert_eq!(Aggregator::with_top_fraction(2.0).top_fraction(), 1.0);
        assert_eq!(Aggregator::with_top_fraction(-1.0).top_fraction(), 0.0);
        assert_eq!(
            Aggregator::with_top_fraction(f64::NAN).top_fraction(),
            DEFAULT_TOP_FRACTION
        );
    }
}
