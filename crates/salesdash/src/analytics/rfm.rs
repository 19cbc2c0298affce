//! Recency / frequency / monetary segmentation.

use super::customers::CustomerTotals;
use super::ratio;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Customer bucket derived from RFM scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RfmSegment {
    /// Recent, frequent, high spend.
    Champions,
    /// Frequent buyers.
    Loyal,
    /// Recent but infrequent.
    Potential,
    /// Frequent buyers who have gone quiet.
    AtRisk,
    /// Everyone else.
    Hibernating,
}

impl RfmSegment {
    /// All buckets in report order.
    pub const ALL: [RfmSegment; 5] = [
        RfmSegment::Champions,
        RfmSegment::Loyal,
        RfmSegment::Potential,
        RfmSegment::AtRisk,
        RfmSegment::Hibernating,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            RfmSegment::Champions => "Champions",
            RfmSegment::AtRisk => "At Risk",
            RfmSegment::Loyal => "Loyal",
            RfmSegment::Potential => "Potential",
            RfmSegment::Hibernating => "Hibernating",
        }
    }

    /// Classify a score triple; each score is 1 (worst) to 5 (best).
    pub fn classify(score: RfmScore) -> Self {
        let RfmScore {
            recency: r,
            frequency: f,
            monetary: m,
            ..
        } = score;
        if r >= 4 && f >= 4 && m >= 4 {
            RfmSegment::Champions
        } else if r <= 2 && f >= 3 {
            RfmSegment::AtRisk
        } else if f >= 4 {
            RfmSegment::Loyal
        } else if r >= 3 {
            RfmSegment::Potential
        } else {
            RfmSegment::Hibernating
        }
    }
}

impl std::fmt::Display for RfmSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Quintile scores of one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RfmScore {
    /// Customer identifier.
    pub customer_id: u32,
    /// 5 = most recent.
    pub recency: u8,
    /// 5 = most orders.
    pub frequency: u8,
    /// 5 = highest revenue.
    pub monetary: u8,
}

/// Customers and revenue in one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmBucket {
    /// Bucket.
    pub segment: RfmSegment,
    /// Customers in the bucket.
    pub customers: usize,
    /// Their summed revenue in cents.
    pub revenue_cents: u64,
    /// Fraction of total revenue.
    pub share: f64,
}

/// RFM segmentation of the customer base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmSummary {
    /// Day after the newest order; recency is measured against it.
    pub reference_date: Option<NaiveDate>,
    /// One entry per [`RfmSegment::ALL`], in order.
    pub buckets: Vec<RfmBucket>,
}

/// Score every customer.
///
/// Customers are ranked worst-to-best on each axis and the rank position is
/// cut into five equal-count bins. Tied values share the bin of their first
/// position, so the score depends only on the customer's own figures.
pub fn score_customers(totals: &[CustomerTotals], reference_date: NaiveDate) -> Vec<RfmScore> {
    // Fewer days since the last order is better.
    let recency = tied_quintiles(totals, |c| {
        std::cmp::Reverse((reference_date - c.last_order).num_days())
    });
    let frequency = tied_quintiles(totals, |c| c.orders);
    let monetary = tied_quintiles(totals, |c| c.revenue_cents);

    totals
        .iter()
        .enumerate()
        .map(|(i, c)| RfmScore {
            customer_id: c.customer_id,
            recency: recency[i],
            frequency: frequency[i],
            monetary: monetary[i],
        })
        .collect()
}

/// Quintile of each customer by `key`, ascending; equal keys get the same quintile.
fn tied_quintiles<K, F>(totals: &[CustomerTotals], key: F) -> Vec<u8>
where
    K: Ord,
    F: Fn(&CustomerTotals) -> K,
{
    let n = totals.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| key(&totals[i]));

    let mut scores = vec![1u8; n];
    let mut run: Option<(K, usize)> = None;
    for (pos, &i) in order.iter().enumerate() {
        let k = key(&totals[i]);
        let start = match run {
            Some((ref prev, start)) if *prev == k => start,
            _ => pos,
        };
        scores[i] = quintile(start, n);
        run = Some((k, start));
    }
    scores
}

/// Bucket customers and total revenue per bucket.
pub fn rfm_summary(totals: &[CustomerTotals]) -> RfmSummary {
    let reference_date = totals
        .iter()
        .map(|c| c.last_order)
        .max()
        .map(|d| d + Duration::days(1));

    let mut buckets: Vec<RfmBucket> = RfmSegment::ALL
        .iter()
        .map(|s| RfmBucket {
            segment: *s,
            customers: 0,
            revenue_cents: 0,
            share: 0.0,
        })
        .collect();

    if let Some(reference) = reference_date {
        for (score, customer) in score_customers(totals, reference).iter().zip(totals) {
            let segment = RfmSegment::classify(*score);
            if let Some(bucket) = buckets.iter_mut().find(|b| b.segment == segment) {
                bucket.customers += 1;
                bucket.revenue_cents += customer.revenue_cents;
            }
        }
    }

    let total: u64 = buckets.iter().map(|b| b.revenue_cents).sum();
    for bucket in &mut buckets {
        bucket.share = ratio(bucket.revenue_cents as f64, total as f64);
    }

    RfmSummary {
        reference_date,
        buckets,
    }
}

fn quintile(pos: usize, n: usize) -> u8 {
    (pos * 5 / n.max(1)) as u8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: u32, orders: usize, revenue: u64, day: u32) -> CustomerTotals {
        CustomerTotals {
            customer_id: id,
            orders,
            revenue_cents: revenue,
            last_order: NaiveDate::from_ymd_opt(2023, 6, day).unwrap(),
        }
    }

    #[test]
    fn test_quintile_bins() {
        let bins: Vec<u8> = (0..10).map(|p| quintile(p, 10)).collect();
        assert_eq!(bins, vec![1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
        assert_eq!(quintile(0, 1), 1);
    }

    #[test]
    fn test_scores_rank_each_axis() {
        // Customer 5 is most recent, most frequent and biggest spender.
        let totals: Vec<CustomerTotals> = (1..=5)
            .map(|i| customer(i, i as usize, i as u64 * 100, i))
            .collect();
        let reference = NaiveDate::from_ymd_opt(2023, 6, 6).unwrap();
        let scores = score_customers(&totals, reference);

        let best = scores.iter().find(|s| s.customer_id == 5).unwrap();
        assert_eq!((best.recency, best.frequency, best.monetary), (5, 5, 5));
        let worst = scores.iter().find(|s| s.customer_id == 1).unwrap();
        assert_eq!((worst.recency, worst.frequency, worst.monetary), (1, 1, 1));
    }

    #[test]
    fn test_classification() {
        let score = |r, f, m| RfmScore {
            customer_id: 0,
            recency: r,
            frequency: f,
            monetary: m,
        };
        assert_eq!(RfmSegment::classify(score(5, 5, 5)), RfmSegment::Champions);
        assert_eq!(RfmSegment::classify(score(1, 4, 5)), RfmSegment::AtRisk);
        assert_eq!(RfmSegment::classify(score(3, 4, 2)), RfmSegment::Loyal);
        assert_eq!(RfmSegment::classify(score(4, 1, 1)), RfmSegment::Potential);
        assert_eq!(RfmSegment::classify(score(1, 1, 1)), RfmSegment::Hibernating);
    }

    #[test]
    fn test_summary_totals() {
        let totals: Vec<CustomerTotals> = (1..=10)
            .map(|i| customer(i, (i % 4) as usize + 1, i as u64 * 10, i))
            .collect();
        let summary = rfm_summary(&totals);
        assert_eq!(
            summary.reference_date,
            NaiveDate::from_ymd_opt(2023, 6, 11)
        );
        assert_eq!(summary.buckets.len(), 5);
        assert_eq!(summary.buckets.iter().map(|b| b.customers).sum::<usize>(), 10);
        assert_eq!(
            summary.buckets.iter().map(|b| b.revenue_cents).sum::<u64>(),
            550
        );
    }

    #[test]
    fn test_identical_customers_share_a_score() {
        let totals: Vec<CustomerTotals> = (1..=10).map(|i| customer(i, 1, 100_00, 1)).collect();
        let reference = NaiveDate::from_ymd_opt(2023, 6, 2).unwrap();
        let scores = score_customers(&totals, reference);

        let first = (scores[0].recency, scores[0].frequency, scores[0].monetary);
        assert!(scores
            .iter()
            .all(|s| (s.recency, s.frequency, s.monetary) == first));

        let summary = rfm_summary(&totals);
        let occupied: Vec<&RfmBucket> =
            summary.buckets.iter().filter(|b| b.customers > 0).collect();
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied[0].customers, 10);
    }

    #[test]
    fn test_partial_ties_use_first_position() {
        // Orders: 1,1,1,1,1,1,2,2,3,4 -> positions 0,0,0,0,0,0,6,6,8,9.
        let orders = [1, 1, 1, 1, 1, 1, 2, 2, 3, 4];
        let totals: Vec<CustomerTotals> = orders
            .iter()
            .enumerate()
            .map(|(i, &o)| customer(10 - i as u32, o, 100, 1))
            .collect();
        let frequency = tied_quintiles(&totals, |c| c.orders);
        assert_eq!(frequency, vec![1, 1, 1, 1, 1, 1, 4, 4, 5, 5]);
    }

    #[test]
    fn test_buckets_ignore_customer_numbering() {
        use crate::analytics::customer_totals;
        use crate::factory::{GeneratorConfig, TransactionGenerator};

        let config = GeneratorConfig::default()
            .with_records(4_000)
            .with_customer_pool(800);
        let table = TransactionGenerator::new(config).unwrap().generate();
        let totals = customer_totals(&table);

        let renumbered: Vec<CustomerTotals> = totals
            .iter()
            .rev()
            .enumerate()
            .map(|(i, c)| CustomerTotals {
                customer_id: i as u32 + 1,
                ..*c
            })
            .collect();

        let counts = |summary: RfmSummary| -> Vec<(RfmSegment, usize, u64)> {
            summary
                .buckets
                .iter()
                .map(|b| (b.segment, b.customers, b.revenue_cents))
                .collect()
        };
        assert_eq!(counts(rfm_summary(&totals)), counts(rfm_summary(&renumbered)));
    }

    #[test]
    fn test_declaration_order_matches_report_order() {
        let mut sorted = RfmSegment::ALL;
        sorted.sort();
        assert_eq!(sorted, RfmSegment::ALL);
    }

    #[test]
    fn test_empty_summary() {
        let summary = rfm_summary(&[]);
        assert!(summary.reference_date.is_none());
        assert!(summary.buckets.iter().all(|b| b.customers == 0 && b.share == 0.0));
    }
}
