//! Transaction factory for generating synthetic sales data.

mod config;
mod customers;
mod generator;
mod pricing;
mod seasonality;

pub use config::{DateRange, GeneratorConfig, WeightTable};
pub use customers::CustomerPool;
pub use generator::TransactionGenerator;
pub use pricing::{category_order_probabilities, sample_price_cents, OrderMix};
pub use seasonality::{SeasonalProfile, MAX_HOLIDAY_PRICE_FACTOR};
