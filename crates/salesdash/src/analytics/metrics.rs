//! Headline business metrics and derived insights.

use super::customers::{ConcentrationSummary, CustomerTotals};
use super::revenue::{GroupRevenue, PeriodRevenue};
use super::ratio;
use crate::types::{Category, Region, TransactionTable, YearMonth};
use serde::Serialize;

/// Headline numbers for the whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    /// Summed revenue in cents.
    pub total_revenue_cents: u64,
    /// Number of orders.
    pub total_orders: usize,
    /// Mean revenue per order in cents.
    pub average_order_value_cents: f64,
    /// Distinct customer ids.
    pub total_customers: usize,
    /// Mean revenue per customer in cents.
    pub customer_lifetime_value_cents: f64,
}

impl KeyMetrics {
    /// Compute from the table and its per-customer rollup.
    pub fn compute(table: &TransactionTable, customers: &[CustomerTotals]) -> Self {
        let total_revenue_cents = table.total_revenue_cents();
        Self {
            total_revenue_cents,
            total_orders: table.len(),
            average_order_value_cents: ratio(total_revenue_cents as f64, table.len() as f64),
            total_customers: customers.len(),
            customer_lifetime_value_cents: ratio(
                total_revenue_cents as f64,
                customers.len() as f64,
            ),
        }
    }
}

/// Answers to the standard dashboard questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Highest-revenue category.
    pub top_category: Option<Category>,
    /// Its revenue in cents.
    pub top_category_revenue_cents: u64,
    /// Highest-revenue month.
    pub peak_month: Option<YearMonth>,
    /// Highest-revenue region.
    pub best_region: Option<Region>,
    /// Fraction of customers with more than one order.
    pub repeat_purchase_rate: f64,
    /// Revenue share of the top customer group.
    pub top_customer_share: f64,
}

impl Insights {
    /// Derive from already-computed summaries.
    pub fn derive(
        by_category: &[GroupRevenue<Category>],
        by_region: &[GroupRevenue<Region>],
        by_month: &[PeriodRevenue<YearMonth>],
        repeat_purchase_rate: f64,
        concentration: &ConcentrationSummary,
    ) -> Self {
        let top_category = by_category.first().filter(|r| r.revenue_cents > 0);

        // Earliest month wins ties.
        let peak_month = by_month
            .iter()
            .filter(|m| m.revenue_cents > 0)
            .fold(None::<&PeriodRevenue<YearMonth>>, |best, m| match best {
                Some(b) if b.revenue_cents >= m.revenue_cents => Some(b),
                _ => Some(m),
            })
            .map(|m| m.period);

        Self {
            top_category: top_category.map(|r| r.key),
            top_category_revenue_cents: top_category.map(|r| r.revenue_cents).unwrap_or(0),
            peak_month,
            best_region: by_region
                .first()
                .filter(|r| r.revenue_cents > 0)
                .map(|r| r.key),
            repeat_purchase_rate,
            top_customer_share: concentration.top_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::customers::{concentration, customer_totals};
    use crate::types::{CustomerSegment, Transaction};
    use chrono::NaiveDate;

    fn table() -> TransactionTable {
        let d = |m| NaiveDate::from_ymd_opt(2023, m, 1).unwrap();
        TransactionTable::try_from_records(vec![
            Transaction::new(1, 1, d(1), Category::Books, 20_00, 1, CustomerSegment::Budget, Region::North),
            Transaction::new(2, 1, d(2), Category::Books, 10_00, 2, CustomerSegment::Budget, Region::North),
            Transaction::new(3, 2, d(2), Category::Beauty, 60_00, 1, CustomerSegment::Regular, Region::South),
        ])
        .unwrap()
    }

    #[test]
    fn test_key_metrics() {
        let table = table();
        let customers = customer_totals(&table);
        let metrics = KeyMetrics::compute(&table, &customers);
        assert_eq!(metrics.total_revenue_cents, 100_00);
        assert_eq!(metrics.total_orders, 3);
        assert_eq!(metrics.total_customers, 2);
        assert!((metrics.average_order_value_cents - 10_000.0 / 3.0).abs() < 1e-9);
        assert!((metrics.customer_lifetime_value_cents - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_metrics_are_zero() {
        let metrics = KeyMetrics::compute(&TransactionTable::empty(), &[]);
        assert_eq!(metrics.total_revenue_cents, 0);
        assert_eq!(metrics.average_order_value_cents, 0.0);
        assert_eq!(metrics.customer_lifetime_value_cents, 0.0);
    }

    #[test]
    fn test_insights() {
        use crate::analytics::revenue::{revenue_by, revenue_by_period};

        let table = table();
        let customers = customer_totals(&table);
        let by_category = revenue_by(&table, &Category::ALL, |t| t.category());
        let by_region = revenue_by(&table, &Region::ALL, |t| t.region());
        let by_month = revenue_by_period(&table, |t| t.month());
        let insights = Insights::derive(
            &by_category,
            &by_region,
            &by_month,
            0.5,
            &concentration(&customers, 0.5),
        );

        assert_eq!(insights.top_category, Some(Category::Beauty));
        assert_eq!(insights.top_category_revenue_cents, 60_00);
        assert_eq!(insights.peak_month, Some(YearMonth { year: 2023, month: 2 }));
        assert_eq!(insights.best_region, Some(Region::South));
    }
}
