//! Core data types for sales transactions.

mod dimensions;
mod period;
mod transaction;

pub use dimensions::{Category, CustomerSegment, Region};
pub use period::{quarter_of_month, Quarter, YearMonth};
pub use transaction::{
    format_cents, format_customer_id, format_order_id, parse_cents, parse_customer_id,
    parse_order_id, Transaction, TransactionTable,
};
