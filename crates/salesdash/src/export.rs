//! Flat-file export and schema-checked import.
//!
//! Columns, in order: `Order_ID, Customer_ID, Date, Category, Price,
//! Quantity, Revenue, Customer_Segment, Region`. Money columns carry exactly
//! two decimals, dates are `YYYY-MM-DD`.

use crate::error::{Result, SalesError};
use crate::types::{
    format_cents, parse_cents, parse_customer_id, parse_order_id, Category, CustomerSegment,
    Region, Transaction, TransactionTable,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One CSV line, kept as text so every field gets a row-specific error.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Customer_ID")]
    customer_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Revenue")]
    revenue: String,
    #[serde(rename = "Customer_Segment")]
    segment: String,
    #[serde(rename = "Region")]
    region: String,
}

impl CsvRow {
    fn from_transaction(tx: &Transaction) -> Self {
        Self {
            order_id: tx.order_label(),
            customer_id: tx.customer_label(),
            date: tx.date().format(DATE_FORMAT).to_string(),
            category: tx.category().name().to_string(),
            price: format_cents(tx.price_cents()),
            quantity: tx.quantity().to_string(),
            revenue: format_cents(tx.revenue_cents()),
            segment: tx.segment().name().to_string(),
            region: tx.region().name().to_string(),
        }
    }

    fn into_transaction(self, row: usize) -> Result<Transaction> {
        let bad = |msg: String| SalesError::schema(row, msg);

        let order_id = parse_order_id(&self.order_id)
            .ok_or_else(|| bad(format!("malformed Order_ID '{}'", self.order_id)))?;
        let customer_id = parse_customer_id(&self.customer_id)
            .ok_or_else(|| bad(format!("malformed Customer_ID '{}'", self.customer_id)))?;
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|e| bad(format!("malformed Date '{}': {}", self.date, e)))?;
        let category: Category = self.category.parse().map_err(bad)?;
        let segment: CustomerSegment = self.segment.parse().map_err(bad)?;
        let region: Region = self.region.parse().map_err(bad)?;

        let price_cents = parse_cents(&self.price)
            .filter(|p| *p > 0)
            .ok_or_else(|| bad(format!("Price must be a positive amount, got '{}'", self.price)))?;
        let quantity: u32 = self
            .quantity
            .trim()
            .parse()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| {
                bad(format!(
                    "Quantity must be a positive integer, got '{}'",
                    self.quantity
                ))
            })?;
        let revenue_cents = parse_cents(&self.revenue)
            .ok_or_else(|| bad(format!("malformed Revenue '{}'", self.revenue)))?;

        Transaction::try_new(
            order_id,
            customer_id,
            date,
            category,
            price_cents,
            quantity,
            segment,
            region,
        )
        .filter(|tx| tx.revenue_cents() == revenue_cents)
        .ok_or_else(|| {
            bad(format!(
                "Revenue {} does not equal Price {} x Quantity {}",
                self.revenue, self.price, self.quantity
            ))
        })
    }
}

/// Write the table as CSV with a header row.
pub fn write_csv<W: Write>(table: &TransactionTable, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for tx in table {
        csv.serialize(CsvRow::from_transaction(tx))?;
    }
    if table.is_empty() {
        // serialize() emits the header lazily; an empty table still gets one.
        csv.write_record([
            "Order_ID",
            "Customer_ID",
            "Date",
            "Category",
            "Price",
            "Quantity",
            "Revenue",
            "Customer_Segment",
            "Region",
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the table to a CSV file, replacing it if present.
pub fn write_csv_path(table: &TransactionTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_csv(table, File::create(path)?)?;
    info!(path = %path.display(), rows = table.len(), "Exported transactions");
    Ok(())
}

/// Parse CSV rows, validating each against the schema.
///
/// Repeated order ids are allowed here; use [`read_csv`] for a strict table
/// or [`crate::cleaning::clean`] to drop them.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (i, row) in csv.deserialize::<CsvRow>().enumerate() {
        records.push(row?.into_transaction(i + 1)?);
    }
    debug!(rows = records.len(), "Parsed transaction rows");
    Ok(records)
}

/// Parse CSV into a table, rejecting duplicate order ids.
pub fn read_csv<R: Read>(reader: R) -> Result<TransactionTable> {
    TransactionTable::try_from_records(read_records(reader)?)
}

/// Read raw records from a CSV file.
pub fn read_records_path(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let records = read_records(File::open(path)?)?;
    info!(path = %path.display(), rows = records.len(), "Loaded transactions");
    Ok(records)
}

/// Read a strict table from a CSV file.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<TransactionTable> {
    TransactionTable::try_from_records(read_records_path(path)?)
}
