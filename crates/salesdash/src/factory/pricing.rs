//! Category, region, quantity and price sampling.

use super::WeightTable;
use crate::error::{Result, SalesError};
use crate::types::{Category, CustomerSegment, Region};
use rand::distributions::WeightedIndex;
use rand::prelude::*;

/// Per-order sampling tables derived from a validated configuration.
pub struct OrderMix {
    category_index: WeightedIndex<f64>,
    region_index: WeightedIndex<f64>,
    quantity_index: Vec<WeightedIndex<f64>>,
}

impl OrderMix {
    /// Build sampling tables.
    ///
    /// Category weights are target revenue shares; regional weights are
    /// order-volume shares.
    pub fn new(
        category_weights: &WeightTable<Category>,
        region_weights: &WeightTable<Region>,
    ) -> Result<Self> {
        let category_index = WeightedIndex::new(category_order_probabilities(category_weights))
            .map_err(|e| SalesError::config(format!("category weights: {}", e)))?;

        let region_index =
            WeightedIndex::new(Region::ALL.iter().map(|r| region_weights.weight(*r)))
                .map_err(|e| SalesError::config(format!("region weights: {}", e)))?;

        let quantity_index = CustomerSegment::ALL
            .iter()
            .map(|s| {
                WeightedIndex::new(s.quantity_weights())
                    .map_err(|e| SalesError::config(format!("quantity weights: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            category_index,
            region_index,
            quantity_index,
        })
    }

    /// Draw a category.
    pub fn sample_category(&self, rng: &mut impl Rng) -> Category {
        Category::ALL[self.category_index.sample(rng)]
    }

    /// Draw a region.
    pub fn sample_region(&self, rng: &mut impl Rng) -> Region {
        Region::ALL[self.region_index.sample(rng)]
    }

    /// Draw units for an order from the segment's basket-size distribution.
    pub fn sample_quantity(&self, segment: CustomerSegment, rng: &mut impl Rng) -> u32 {
        self.quantity_index[segment.index()].sample(rng) as u32 + 1
    }
}

/// Order-sampling probabilities that realize the given revenue shares.
///
/// Segment, quantity and holiday pricing are independent of category, so
/// dividing each target share by the category's mean base price makes the
/// expected revenue share equal the target.
pub fn category_order_probabilities(revenue_shares: &WeightTable<Category>) -> Vec<f64> {
    let raw: Vec<f64> = Category::ALL
        .iter()
        .map(|c| revenue_shares.weight(*c) / c.mean_price_cents())
        .collect();
    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        raw.into_iter().map(|w| w / total).collect()
    } else {
        raw
    }
}

/// Unit price in cents for one order, never below one cent.
pub fn sample_price_cents(
    category: Category,
    segment: CustomerSegment,
    seasonal_factor: f64,
    rng: &mut impl Rng,
) -> u64 {
    let (low, high) = category.price_range_cents();
    let base = rng.gen_range(low..high) as f64;
    let price = (base * segment.price_multiplier() * seasonal_factor).round();
    (price as u64).max(1)
}
