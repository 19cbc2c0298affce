//! Per-customer rollups: concentration and repeat purchases.

use super::ratio;
use crate::types::TransactionTable;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Order history of one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomerTotals {
    /// Customer identifier.
    pub customer_id: u32,
    /// Number of orders.
    pub orders: usize,
    /// Summed revenue in cents.
    pub revenue_cents: u64,
    /// Most recent order date.
    pub last_order: NaiveDate,
}

/// A customer's position in the revenue ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedCustomer {
    /// Customer identifier.
    pub customer_id: u32,
    /// Summed revenue in cents.
    pub revenue_cents: u64,
    /// Share of total revenue held by this customer and everyone above.
    pub cumulative_share: f64,
}

/// Revenue concentration among the top customers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationSummary {
    /// Top fraction of customers considered (e.g. 0.2).
    pub top_fraction: f64,
    /// Distinct customers in the table.
    pub distinct_customers: usize,
    /// Customers in the top group, `floor(top_fraction * distinct_customers)`.
    pub top_customers: usize,
    /// Revenue of the top group in cents.
    pub top_revenue_cents: u64,
    /// Share of total revenue held by the top group.
    pub top_share: f64,
    /// Highest-revenue customers with cumulative share.
    pub leaders: Vec<RankedCustomer>,
}

/// Leaders kept in the summary.
const LEADER_COUNT: usize = 10;

/// Roll the table up per customer, ordered by customer id.
pub fn customer_totals(table: &TransactionTable) -> Vec<CustomerTotals> {
    let mut by_id: BTreeMap<u32, CustomerTotals> = BTreeMap::new();
    for tx in table {
        let entry = by_id.entry(tx.customer_id()).or_insert(CustomerTotals {
            customer_id: tx.customer_id(),
            orders: 0,
            revenue_cents: 0,
            last_order: tx.date(),
        });
        entry.orders += 1;
        entry.revenue_cents += tx.revenue_cents();
        entry.last_order = entry.last_order.max(tx.date());
    }
    by_id.into_values().collect()
}

/// Customers ranked by revenue descending, ties by ascending id.
pub fn ranked_customers(totals: &[CustomerTotals]) -> Vec<RankedCustomer> {
    let mut sorted: Vec<&CustomerTotals> = totals.iter().collect();
    sorted.sort_by(|a, b| {
        b.revenue_cents
            .cmp(&a.revenue_cents)
            .then(a.customer_id.cmp(&b.customer_id))
    });

    let total: u64 = totals.iter().map(|c| c.revenue_cents).sum();
    let mut running = 0u64;
    sorted
        .into_iter()
        .map(|c| {
            running += c.revenue_cents;
            RankedCustomer {
                customer_id: c.customer_id,
                revenue_cents: c.revenue_cents,
                cumulative_share: ratio(running as f64, total as f64),
            }
        })
        .collect()
}

/// Share of revenue held by the top `top_fraction` of customers.
pub fn concentration(totals: &[CustomerTotals], top_fraction: f64) -> ConcentrationSummary {
    let ranked = ranked_customers(totals);
    let distinct = ranked.len();
    let top_fraction = top_fraction.clamp(0.0, 1.0);
    let top_customers = ((top_fraction * distinct as f64).floor() as usize).min(distinct);

    let top_revenue_cents: u64 = ranked[..top_customers]
        .iter()
        .map(|c| c.revenue_cents)
        .sum();
    let top_share = if top_customers == 0 {
        0.0
    } else {
        ranked[top_customers - 1].cumulative_share
    };

    ConcentrationSummary {
        top_fraction,
        distinct_customers: distinct,
        top_customers,
        top_revenue_cents,
        top_share,
        leaders: ranked.into_iter().take(LEADER_COUNT).collect(),
    }
}

/// Fraction of distinct customers with more than one order; 0.0 when none.
pub fn repeat_purchase_rate(totals: &[CustomerTotals]) -> f64 {
    let repeaters = totals.iter().filter(|c| c.orders > 1).count();
    ratio(repeaters as f64, totals.len() as f64)
}
