//! Customer pool with a long-tailed order distribution.

use super::WeightTable;
use crate::error::{Result, SalesError};
use crate::types::CustomerSegment;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// Bounded pool of customer ids, each with a fixed segment.
///
/// Customers are ranked; rank `k` (1-based) is drawn with weight `1 / k^s`.
/// Ids are shuffled against rank so heavy buyers are spread across the id range.
pub struct CustomerPool {
    ids_by_rank: Vec<u32>,
    segments: Vec<CustomerSegment>,
    rank_index: WeightedIndex<f64>,
}

impl CustomerPool {
    /// Build a pool of `size` customers (ids `1..=size`).
    pub fn generate(
        size: u32,
        zipf_exponent: f64,
        segment_weights: &WeightTable<CustomerSegment>,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let segment_index = WeightedIndex::new(
            CustomerSegment::ALL
                .iter()
                .map(|s| segment_weights.weight(*s)),
        )
        .map_err(|e| SalesError::config(format!("segment weights: {}", e)))?;

        let segments: Vec<CustomerSegment> = (0..size)
            .map(|_| CustomerSegment::ALL[segment_index.sample(rng)])
            .collect();

        let mut ids_by_rank: Vec<u32> = (1..=size).collect();
        ids_by_rank.shuffle(rng);

        let rank_index = WeightedIndex::new(
            (1..=size).map(|rank| (rank as f64).powf(-zipf_exponent)),
        )
        .map_err(|e| SalesError::config(format!("customer weights: {}", e)))?;

        Ok(Self {
            ids_by_rank,
            segments,
            rank_index,
        })
    }

    /// Draw a customer id and its segment.
    pub fn sample(&self, rng: &mut impl Rng) -> (u32, CustomerSegment) {
        let id = self.ids_by_rank[self.rank_index.sample(rng)];
        (id, self.segment_of(id))
    }

    /// Segment of a customer id from this pool.
    pub fn segment_of(&self, customer_id: u32) -> CustomerSegment {
        self.segments[(customer_id - 1) as usize]
    }

    /// Customer counts per segment, in [`CustomerSegment::ALL`] order.
    pub fn segment_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for s in &self.segments {
            counts[s.index()] += 1;
        }
        counts
    }
}
