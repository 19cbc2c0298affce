//! Transaction record and the immutable table that holds them.

use super::{Category, CustomerSegment, Quarter, Region, YearMonth};
use crate::error::{Result, SalesError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// A single e-commerce order line.
///
/// Money is held in integer cents, so `revenue == price × quantity` holds
/// exactly. Revenue is derived in the constructor and cannot be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Transaction {
    order_id: u64,
    customer_id: u32,
    date: NaiveDate,
    category: Category,
    price_cents: u64,
    quantity: u32,
    revenue_cents: u64,
    segment: CustomerSegment,
    region: Region,
}

impl Transaction {
    /// Create a transaction; revenue is `price_cents * quantity`.
    ///
    /// Returns `None` when the revenue does not fit in `u64` cents.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        order_id: u64,
        customer_id: u32,
        date: NaiveDate,
        category: Category,
        price_cents: u64,
        quantity: u32,
        segment: CustomerSegment,
        region: Region,
    ) -> Option<Self> {
        let revenue_cents = price_cents.checked_mul(quantity as u64)?;
        Some(Self {
            order_id,
            customer_id,
            date,
            category,
            price_cents,
            quantity,
            revenue_cents,
            segment,
            region,
        })
    }

    /// Unchecked constructor for callers whose prices are bounded.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        order_id: u64,
        customer_id: u32,
        date: NaiveDate,
        category: Category,
        price_cents: u64,
        quantity: u32,
        segment: CustomerSegment,
        region: Region,
    ) -> Self {
        Self {
            order_id,
            customer_id,
            date,
            category,
            price_cents,
            quantity,
            revenue_cents: price_cents * quantity as u64,
            segment,
            region,
        }
    }

    /// Unique order identifier.
    pub fn order_id(&self) -> u64 {
        self.order_id
    }

    /// Customer identifier (recurs across orders).
    pub fn customer_id(&self) -> u32 {
        self.customer_id
    }

    /// Order date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Product category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Unit price in cents.
    pub fn price_cents(&self) -> u64 {
        self.price_cents
    }

    /// Units ordered.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line revenue in cents.
    pub fn revenue_cents(&self) -> u64 {
        self.revenue_cents
    }

    /// Segment of the ordering customer.
    pub fn segment(&self) -> CustomerSegment {
        self.segment
    }

    /// Sales region.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Calendar quarter of the order date.
    pub fn quarter(&self) -> Quarter {
        Quarter::of(self.date)
    }

    /// Calendar month of the order date.
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    /// `ORD000001` style identifier.
    pub fn order_label(&self) -> String {
        format_order_id(self.order_id)
    }

    /// `CUST00001` style identifier.
    pub fn customer_label(&self) -> String {
        format_customer_id(self.customer_id)
    }
}

/// Immutable, in-memory transaction table with unique order ids.
///
/// Total revenue always fits in `u64` cents, so every grouped sum over the
/// table fits as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionTable {
    records: Vec<Transaction>,
}

impl TransactionTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table, rejecting duplicate order ids and revenue totals
    /// that overflow `u64` cents.
    pub fn try_from_records(records: Vec<Transaction>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut total = 0u64;
        for (i, tx) in records.iter().enumerate() {
            if !seen.insert(tx.order_id) {
                return Err(SalesError::schema(
                    i + 1,
                    format!("duplicate order id {}", tx.order_label()),
                ));
            }
            total = total.checked_add(tx.revenue_cents).ok_or_else(|| {
                SalesError::schema(i + 1, "table revenue total exceeds the representable range")
            })?;
        }
        Ok(Self { records })
    }

    /// Build from records the caller already knows to be unique and bounded.
    pub(crate) fn from_unique(records: Vec<Transaction>) -> Self {
        debug_assert_eq!(
            records.iter().map(|t| t.order_id).collect::<HashSet<_>>().len(),
            records.len()
        );
        debug_assert!(records
            .iter()
            .try_fold(0u64, |acc, t| acc.checked_add(t.revenue_cents))
            .is_some());
        Self { records }
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    /// Iterate over records.
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of revenue over all records, in cents.
    pub fn total_revenue_cents(&self) -> u64 {
        self.records.iter().map(|t| t.revenue_cents).sum()
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Format an order id as `ORD000001`.
pub fn format_order_id(id: u64) -> String {
    format!("ORD{:06}", id)
}

/// Format a customer id as `CUST00001`.
pub fn format_customer_id(id: u32) -> String {
    format!("CUST{:05}", id)
}

/// Parse `ORD000001`.
pub fn parse_order_id(s: &str) -> Option<u64> {
    parse_prefixed(s, "ORD")
}

/// Parse `CUST00001`.
pub fn parse_customer_id(s: &str) -> Option<u32> {
    parse_prefixed(s, "CUST")
}

fn parse_prefixed<T: std::str::FromStr>(s: &str, prefix: &str) -> Option<T> {
    let digits = s.trim().strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Format cents as a fixed two-decimal amount, e.g. `1234.56`.
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Parse a non-negative decimal amount with at most two fractional digits.
pub fn parse_cents(s: &str) -> Option<u64> {
    let s = s.trim();
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: u64 = whole.parse().ok()?;
    let frac: u64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<u64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(order_id: u64) -> Transaction {
        Transaction::new(
            order_id,
            7,
            NaiveDate::from_ymd_opt(2023, 11, 24).unwrap(),
            Category::Electronics,
            499_99,
            3,
            CustomerSegment::Premium,
            Region::North,
        )
    }

    #[test]
    fn test_revenue_is_price_times_quantity() {
        let tx = sample(1);
        assert_eq!(tx.revenue_cents(), 1_499_97);
        assert_eq!(tx.quarter(), Quarter { year: 2023, quarter: 4 });
    }

    #[test]
    fn test_labels() {
        let tx = sample(42);
        assert_eq!(tx.order_label(), "ORD000042");
        assert_eq!(tx.customer_label(), "CUST00007");
        assert_eq!(parse_order_id("ORD000042"), Some(42));
        assert_eq!(parse_customer_id("CUST00007"), Some(7));
        assert_eq!(parse_order_id("ORD"), None);
        assert_eq!(parse_customer_id("C00007"), None);
        assert_eq!(parse_order_id("ORD-12"), None);
    }

    #[test]
    fn test_money_format() {
        assert_eq!(format_cents(123_456), "1234.56");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(parse_cents("1234.56"), Some(123_456));
        assert_eq!(parse_cents("12.5"), Some(1_250));
        assert_eq!(parse_cents("12"), Some(1_200));
        assert_eq!(parse_cents("12.345"), None);
        assert_eq!(parse_cents("-1.00"), None);
        assert_eq!(parse_cents(".50"), None);
    }

    #[test]
    fn test_duplicate_order_ids_rejected() {
        let err = TransactionTable::try_from_records(vec![sample(1), sample(2), sample(1)])
            .unwrap_err();
        assert!(matches!(err, SalesError::Schema { row: 3, .. }));
    }

    #[test]
    fn test_table_accessors() {
        let table = TransactionTable::try_from_records(vec![sample(1), sample(2)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_revenue_cents(), 2 * 1_499_97);
        assert_eq!(TransactionTable::empty().total_revenue_cents(), 0);
    }

    #[test]
    fn test_try_new_rejects_revenue_overflow() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let make = |price, qty| {
            Transaction::try_new(
                1,
                1,
                date,
                Category::Books,
                price,
                qty,
                CustomerSegment::Budget,
                Region::East,
            )
        };
        assert!(make(u64::MAX, 2).is_none());
        assert_eq!(make(u64::MAX, 1).map(|t| t.revenue_cents()), Some(u64::MAX));
        assert_eq!(make(10_00, 3).map(|t| t.revenue_cents()), Some(30_00));
    }

    #[test]
    fn test_overflowing_table_total_rejected() {
        let big = |id| {
            Transaction::try_new(
                id,
                1,
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                Category::Electronics,
                u64::MAX / 2 + 1,
                1,
                CustomerSegment::Premium,
                Region::North,
            )
            .unwrap()
        };
        let err = TransactionTable::try_from_records(vec![big(1), big(2)]).unwrap_err();
        assert!(matches!(err, SalesError::Schema { row: 2, .. }));
        TransactionTable::try_from_records(vec![big(1)]).unwrap();
    }
}
