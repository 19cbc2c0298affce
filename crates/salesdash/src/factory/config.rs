//! Generator configuration and validation.

use super::SeasonalProfile;
use crate::error::{Result, SalesError};
use crate::types::{Category, CustomerSegment, Region};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Non-negative sampling weights keyed by a categorical dimension.
///
/// Keys missing from the table have weight zero and are never sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable<K: Ord> {
    weights: BTreeMap<K, f64>,
}

impl<K: Ord + Copy + std::fmt::Display> WeightTable<K> {
    /// Build from `(key, weight)` pairs. Later duplicates overwrite earlier ones.
    pub fn new(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            weights: pairs.into_iter().collect(),
        }
    }

    /// Weight for a key, zero if absent.
    pub fn weight(&self, key: K) -> f64 {
        self.weights.get(&key).copied().unwrap_or(0.0)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Weight divided by the total. Only meaningful on a validated table.
    pub fn share(&self, key: K) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.weight(key) / total
        } else {
            0.0
        }
    }

    /// Check that every weight is finite and non-negative and the total is positive.
    pub fn validate(&self, name: &str) -> Result<()> {
        for (key, w) in &self.weights {
            if !w.is_finite() || *w < 0.0 {
                return Err(SalesError::config(format!(
                    "{} weight for '{}' must be a finite non-negative number, got {}",
                    name, key, w
                )));
            }
        }
        let total = self.total();
        if total <= 0.0 {
            return Err(SalesError::config(format!(
                "{} weights must sum to a positive total, got {}",
                name, total
            )));
        }
        Ok(())
    }
}

/// Inclusive calendar window for order dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a window; call [`DateRange::validate`] before use.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days in the window, zero if inverted.
    pub fn days(&self) -> usize {
        let span = (self.end - self.start).num_days();
        if span < 0 {
            0
        } else {
            span as usize + 1
        }
    }

    /// True if the date lies inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the window in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.days())
    }

    /// Reject inverted windows.
    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(SalesError::config(format!(
                "date range is inverted: start {} is after end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: calendar_date(2022, 1, 1),
            end: calendar_date(2023, 12, 31),
        }
    }
}

/// Date from literal parts. Only called with valid dates, so the
/// `unwrap_or_default` fallback is unreachable.
fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Configuration for the transaction generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of transactions to produce.
    pub record_count: usize,
    /// Random seed; identical seeds and configs produce identical tables.
    pub seed: u64,
    /// Window for order dates.
    pub date_range: DateRange,
    /// Number of distinct customer ids available.
    pub customer_pool: u32,
    /// Exponent `s` of the `1 / rank^s` customer weighting (0 = uniform).
    pub zipf_exponent: f64,
    /// Target share of revenue per category.
    pub category_weights: WeightTable<Category>,
    /// Target share of order volume per region.
    pub region_weights: WeightTable<Region>,
    /// Share of customers per segment.
    pub segment_weights: WeightTable<CustomerSegment>,
    /// Seasonal density and holiday pricing.
    pub seasonality: SeasonalProfile,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: 50_000,
            seed: 42,
            date_range: DateRange::default(),
            customer_pool: 10_000,
            zipf_exponent: 0.6,
            category_weights: WeightTable::new([
                (Category::Electronics, 0.35),
                (Category::Clothing, 0.15),
                (Category::HomeKitchen, 0.18),
                (Category::Books, 0.07),
                (Category::Sports, 0.13),
                (Category::Beauty, 0.12),
            ]),
            region_weights: WeightTable::new([
                (Region::North, 0.45),
                (Region::South, 0.15),
                (Region::East, 0.15),
                (Region::West, 0.15),
                (Region::Central, 0.10),
            ]),
            segment_weights: WeightTable::new([
                (CustomerSegment::Premium, 0.2),
                (CustomerSegment::Regular, 0.5),
                (CustomerSegment::Budget, 0.3),
            ]),
            seasonality: SeasonalProfile::default(),
        }
    }
}

impl GeneratorConfig {
    /// Set record count.
    pub fn with_records(mut self, count: usize) -> Self {
        self.record_count = count;
        self
    }

    /// Set seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set date window.
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }

    /// Set customer pool size.
    pub fn with_customer_pool(mut self, customers: u32) -> Self {
        self.customer_pool = customers;
        self
    }

    /// Set seasonal profile.
    pub fn with_seasonality(mut self, seasonality: SeasonalProfile) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// Fail fast on any parameter that would produce degenerate output.
    pub fn validate(&self) -> Result<()> {
        if self.record_count == 0 {
            return Err(SalesError::config("record count must be greater than zero"));
        }
        if self.customer_pool == 0 {
            return Err(SalesError::config(
                "customer pool must contain at least one customer",
            ));
        }
        if !self.zipf_exponent.is_finite() || self.zipf_exponent < 0.0 {
            return Err(SalesError::config(format!(
                "zipf exponent must be a finite non-negative number, got {}",
                self.zipf_exponent
            )));
        }
        self.date_range.validate()?;
        self.category_weights.validate("category")?;
        self.region_weights.validate("region")?;
        self.segment_weights.validate("segment")?;
        self.seasonality.validate()?;
        Ok(())
    }
}
