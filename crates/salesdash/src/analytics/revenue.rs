//! Grouped revenue sums.

use super::ratio;
use crate::types::{Category, Region, Transaction, TransactionTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Revenue of one categorical group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRevenue<K> {
    /// Group key.
    pub key: K,
    /// Summed revenue in cents.
    pub revenue_cents: u64,
    /// Number of orders in the group.
    pub orders: usize,
    /// Fraction of total revenue (0.0 for an empty table).
    pub share: f64,
}

/// Revenue of one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRevenue<P> {
    /// Bucket.
    pub period: P,
    /// Summed revenue in cents.
    pub revenue_cents: u64,
    /// Number of orders in the bucket.
    pub orders: usize,
}

/// Revenue per region for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRegionRow {
    /// Row category.
    pub category: Category,
    /// Revenue in cents, one entry per [`Region::ALL`] in order.
    pub revenue_cents: Vec<u64>,
}

/// Sum revenue over every key in `keys`, descending by revenue.
///
/// Keys with no orders appear with zero revenue. Ties keep the order of `keys`.
pub fn revenue_by<K, F>(table: &TransactionTable, keys: &[K], key_of: F) -> Vec<GroupRevenue<K>>
where
    K: Copy + PartialEq,
    F: Fn(&Transaction) -> K,
{
    let total = table.total_revenue_cents();
    let mut rows: Vec<GroupRevenue<K>> = keys
        .iter()
        .map(|k| GroupRevenue {
            key: *k,
            revenue_cents: 0,
            orders: 0,
            share: 0.0,
        })
        .collect();

    for tx in table {
        let key = key_of(tx);
        if let Some(row) = rows.iter_mut().find(|r| r.key == key) {
            row.revenue_cents += tx.revenue_cents();
            row.orders += 1;
        }
    }

    for row in &mut rows {
        row.share = ratio(row.revenue_cents as f64, total as f64);
    }

    // Stable sort keeps declaration order for ties.
    rows.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents));
    rows
}

/// Sum revenue per time bucket, chronologically. Only buckets with orders appear.
pub fn revenue_by_period<P, F>(table: &TransactionTable, period_of: F) -> Vec<PeriodRevenue<P>>
where
    P: Ord + Copy,
    F: Fn(&Transaction) -> P,
{
    let mut buckets: BTreeMap<P, (u64, usize)> = BTreeMap::new();
    for tx in table {
        let entry = buckets.entry(period_of(tx)).or_default();
        entry.0 += tx.revenue_cents();
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(period, (revenue_cents, orders))| PeriodRevenue {
            period,
            revenue_cents,
            orders,
        })
        .collect()
}

/// Category x region revenue matrix.
pub fn category_region_matrix(table: &TransactionTable) -> Vec<CategoryRegionRow> {
    let mut cells = [[0u64; 5]; 6];
    for tx in table {
        cells[tx.category().index()][tx.region().index()] += tx.revenue_cents();
    }
    Category::ALL
        .iter()
        .map(|c| CategoryRegionRow {
            category: *c,
            revenue_cents: cells[c.index()].to_vec(),
        })
        .collect()
}
