//! Categorical dimensions of a transaction.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Phones, laptops, audio.
    Electronics,
    /// Apparel and footwear.
    Clothing,
    /// Furniture, cookware, appliances.
    #[serde(rename = "Home & Kitchen")]
    HomeKitchen,
    /// Print and e-books.
    Books,
    /// Sporting goods.
    Sports,
    /// Cosmetics and personal care.
    Beauty,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeKitchen,
        Category::Books,
        Category::Sports,
        Category::Beauty,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HomeKitchen => "Home & Kitchen",
            Category::Books => "Books",
            Category::Sports => "Sports",
            Category::Beauty => "Beauty",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Uniform unit price range in cents, `[low, high)`.
    pub fn price_range_cents(&self) -> (u64, u64) {
        match self {
            Category::Electronics => (150_00, 1_500_00),
            Category::Clothing => (20_00, 200_00),
            Category::HomeKitchen => (30_00, 500_00),
            Category::Books => (10_00, 50_00),
            Category::Sports => (25_00, 300_00),
            Category::Beauty => (15_00, 150_00),
        }
    }

    /// Mean of the base price range in cents.
    pub fn mean_price_cents(&self) -> f64 {
        let (low, high) = self.price_range_cents();
        (low + high) as f64 / 2.0
    }
}

/// Sales region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Central.
    Central,
}

impl Region {
    /// All regions in declaration order.
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
        }
    }

    /// Position in [`Region::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Customer spending segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerSegment {
    /// High spenders, larger baskets.
    Premium,
    /// Typical customers.
    Regular,
    /// Price-sensitive customers.
    Budget,
}

impl CustomerSegment {
    /// All segments in declaration order.
    pub const ALL: [CustomerSegment; 3] = [
        CustomerSegment::Premium,
        CustomerSegment::Regular,
        CustomerSegment::Budget,
    ];

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            CustomerSegment::Premium => "Premium",
            CustomerSegment::Regular => "Regular",
            CustomerSegment::Budget => "Budget",
        }
    }

    /// Position in [`CustomerSegment::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Unit price multiplier applied on top of the category price.
    pub fn price_multiplier(&self) -> f64 {
        match self {
            CustomerSegment::Premium => 1.3,
            CustomerSegment::Regular => 1.0,
            CustomerSegment::Budget => 0.8,
        }
    }

    /// Probabilities of buying 1, 2 or 3 units.
    pub fn quantity_weights(&self) -> [f64; 3] {
        match self {
            CustomerSegment::Premium => [0.60, 0.25, 0.15],
            CustomerSegment::Regular => [0.80, 0.15, 0.05],
            CustomerSegment::Budget => [0.90, 0.08, 0.02],
        }
    }

    /// Expected units per order.
    pub fn mean_quantity(&self) -> f64 {
        self.quantity_weights()
            .iter()
            .enumerate()
            .map(|(i, p)| (i + 1) as f64 * p)
            .sum()
    }
}

macro_rules! display_and_parse {
    ($ty:ident, $what:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("unknown {} '{}'", $what, s))
            }
        }
    };
}

display_and_parse!(Category, "category");
display_and_parse!(Region, "region");
display_and_parse!(CustomerSegment, "customer segment");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        for (i, r) in Region::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
        }
        for (i, s) in CustomerSegment::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn test_parse_display_names() {
        assert_eq!("Home & Kitchen".parse::<Category>(), Ok(Category::HomeKitchen));
        assert_eq!(" north ".parse::<Region>(), Ok(Region::North));
        assert_eq!("premium".parse::<CustomerSegment>(), Ok(CustomerSegment::Premium));
        assert!("Toys".parse::<Category>().is_err());
    }

    #[test]
    fn test_premium_spends_more() {
        let premium = CustomerSegment::Premium;
        let budget = CustomerSegment::Budget;
        assert!(premium.price_multiplier() > budget.price_multiplier());
        assert!(premium.mean_quantity() > budget.mean_quantity());
    }

    #[test]
    fn test_quantity_weights_sum_to_one() {
        for s in CustomerSegment::ALL {
            let total: f64 = s.quantity_weights().iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Category::HomeKitchen).unwrap();
        assert_eq!(json, "\"Home & Kitchen\"");
    }
}
