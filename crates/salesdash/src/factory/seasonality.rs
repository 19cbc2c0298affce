//! Seasonal date density and holiday pricing.

use super::DateRange;
use crate::error::{Result, SalesError};
use crate::types::quarter_of_month;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Largest accepted holiday price factor. Keeps every generated price small
/// enough that table revenue totals stay within `u64` cents.
pub const MAX_HOLIDAY_PRICE_FACTOR: f64 = 10.0;

/// Calendar shaping of the synthetic workload.
///
/// Every day has base weight 1.0; days in `peak_quarter` get `uplift`, so the
/// expected order count per peak-quarter day is `uplift` times a normal day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalProfile {
    /// Quarter (1-4) receiving extra order density.
    pub peak_quarter: u8,
    /// Density multiplier for peak-quarter days (>= 1.0).
    pub uplift: f64,
    /// Unit price multiplier for November and December orders.
    pub holiday_price_factor: f64,
}

impl Default for SeasonalProfile {
    fn default() -> Self {
        Self {
            peak_quarter: 4,
            uplift: 1.6,
            holiday_price_factor: 1.2,
        }
    }
}

impl SeasonalProfile {
    /// No seasonal effects at all.
    pub fn flat() -> Self {
        Self {
            peak_quarter: 4,
            uplift: 1.0,
            holiday_price_factor: 1.0,
        }
    }

    /// Relative order density for a day.
    pub fn day_weight(&self, date: NaiveDate) -> f64 {
        if quarter_of_month(date.month()) == self.peak_quarter {
            self.uplift
        } else {
            1.0
        }
    }

    /// Density weights for every day of the window, in order.
    pub fn day_weights(&self, range: &DateRange) -> Vec<f64> {
        range.iter_days().map(|d| self.day_weight(d)).collect()
    }

    /// Unit price multiplier for a day.
    pub fn price_factor(&self, date: NaiveDate) -> f64 {
        match date.month() {
            11 | 12 => self.holiday_price_factor,
            _ => 1.0,
        }
    }

    /// Check quarter and multipliers.
    pub fn validate(&self) -> Result<()> {
        if !(1..=4).contains(&self.peak_quarter) {
            return Err(SalesError::config(format!(
                "peak quarter must be between 1 and 4, got {}",
                self.peak_quarter
            )));
        }
        if !self.uplift.is_finite() || self.uplift < 1.0 {
            return Err(SalesError::config(format!(
                "seasonal uplift must be a finite number >= 1.0, got {}",
                self.uplift
            )));
        }
        let factor = self.holiday_price_factor;
        if !factor.is_finite() || factor <= 0.0 || factor > MAX_HOLIDAY_PRICE_FACTOR {
            return Err(SalesError::config(format!(
                "holiday price factor must be in (0, {}], got {}",
                MAX_HOLIDAY_PRICE_FACTOR, factor
            )));
        }
        Ok(())
    }
}
