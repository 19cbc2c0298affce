//! Calendar buckets used for time-series summaries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar quarter of a specific year. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quarter {
    /// Calendar year.
    pub year: i32,
    /// Quarter number, 1-4.
    pub quarter: u8,
}

impl Quarter {
    /// Quarter containing the given date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: quarter_of_month(date.month()),
        }
    }
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

/// Calendar month of a specific year. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-12.
    pub month: u8,
}

impl YearMonth {
    /// Month containing the given date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Quarter number (1-4) for a month number (1-12).
pub fn quarter_of_month(month: u32) -> u8 {
    ((month - 1) / 3 + 1) as u8
}
