//! Transaction generator for synthetic sales tables.

use super::pricing::{sample_price_cents, OrderMix};
use super::{CustomerPool, GeneratorConfig};
use crate::error::{Result, SalesError};
use crate::types::{Transaction, TransactionTable};
use chrono::NaiveDate;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Transaction generator that produces reproducible synthetic sales tables.
pub struct TransactionGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    customers: CustomerPool,
    mix: OrderMix,
    days: Vec<NaiveDate>,
    day_index: WeightedIndex<f64>,
    next_order_id: u64,
}

impl TransactionGenerator {
    /// Validate the configuration and prepare sampling tables.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let customers = CustomerPool::generate(
            config.customer_pool,
            config.zipf_exponent,
            &config.segment_weights,
            &mut rng,
        )?;
        let mix = OrderMix::new(&config.category_weights, &config.region_weights)?;

        let days: Vec<NaiveDate> = config.date_range.iter_days().collect();
        let day_index = WeightedIndex::new(config.seasonality.day_weights(&config.date_range))
            .map_err(|e| SalesError::config(format!("seasonal weights: {}", e)))?;

        let [premium, regular, budget] = customers.segment_counts();
        debug!(
            premium,
            regular,
            budget,
            days = days.len(),
            zipf_exponent = config.zipf_exponent,
            "Transaction generator ready"
        );

        Ok(Self {
            config,
            rng,
            customers,
            mix,
            days,
            day_index,
            next_order_id: 1,
        })
    }

    /// Generate the configured number of transactions.
    pub fn generate(&mut self) -> TransactionTable {
        info!(
            records = self.config.record_count,
            seed = self.config.seed,
            start = %self.config.date_range.start,
            end = %self.config.date_range.end,
            "Generating transactions"
        );
        let table = TransactionTable::from_unique(self.generate_batch(self.config.record_count));
        info!(
            records = table.len(),
            revenue_cents = table.total_revenue_cents(),
            "Generation complete"
        );
        table
    }

    /// Generate `count` transactions, continuing the order id sequence.
    pub fn generate_batch(&mut self, count: usize) -> Vec<Transaction> {
        let mut transactions = Vec::with_capacity(count);
        for _ in 0..count {
            transactions.push(self.next_transaction());
        }
        transactions
    }

    fn next_transaction(&mut self) -> Transaction {
        let order_id = self.next_order_id;
        self.next_order_id += 1;

        let date = self.days[self.day_index.sample(&mut self.rng)];
        let (customer_id, segment) = self.customers.sample(&mut self.rng);
        let category = self.mix.sample_category(&mut self.rng);
        let region = self.mix.sample_region(&mut self.rng);
        let quantity = self.mix.sample_quantity(segment, &mut self.rng);
        let price_cents = sample_price_cents(
            category,
            segment,
            self.config.seasonality.price_factor(date),
            &mut self.rng,
        );

        Transaction::new(
            order_id,
            customer_id,
            date,
            category,
            price_cents,
            quantity,
            segment,
            region,
        )
    }
}
