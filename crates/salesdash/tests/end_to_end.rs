//! End-to-end tests: synthesize, aggregate, export and reload.

use chrono::NaiveDate;
use salesdash::export;
use salesdash::prelude::*;
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn scenario_config() -> GeneratorConfig {
    GeneratorConfig::default()
        .with_records(1_000)
        .with_seed(42)
        .with_date_range(date(2022, 1, 1), date(2023, 12, 31))
}

/// 1,000 records, seed 42, two-year window.
#[test]
fn test_small_scenario() {
    let table = TransactionGenerator::new(scenario_config())
        .expect("valid config")
        .generate();

    assert_eq!(table.len(), 1_000);
    let ids: HashSet<u64> = table.iter().map(|t| t.order_id()).collect();
    assert_eq!(ids.len(), 1_000);
    assert!(table.iter().all(|t| t.revenue_cents() > 0));

    // Orders per quarter of year, both years pooled.
    let mut per_quarter = [0usize; 4];
    for tx in table.iter() {
        per_quarter[(tx.quarter().quarter - 1) as usize] += 1;
    }
    let others = (per_quarter[0] + per_quarter[1] + per_quarter[2]) as f64 / 3.0;
    assert!(
        per_quarter[3] as f64 >= 1.2 * others,
        "Q4 {} vs mean of other quarters {:.1}",
        per_quarter[3],
        others
    );

    let report = Aggregator::default().summarize(&table);
    assert_eq!(report.by_quarter.len(), 8);
    assert!(report.by_quarter.windows(2).all(|w| w[0].period < w[1].period));
}

/// Dominant category lands near its configured revenue share.
#[test]
fn test_category_share_near_target() {
    let config = GeneratorConfig::default().with_records(50_000).with_seed(42);
    let target = config.category_weights.share(Category::Electronics);
    let table = TransactionGenerator::new(config).expect("valid config").generate();
    let report = Aggregator::default().summarize(&table);

    let top = &report.by_category[0];
    assert_eq!(top.key, Category::Electronics);
    assert!(
        (top.share - target).abs() <= 0.05,
        "Electronics share {:.3} vs target {:.3}",
        top.share,
        target
    );

    let north = report
        .by_region
        .iter()
        .find(|r| r.key == Region::North)
        .expect("North row");
    let volume_share = north.orders as f64 / table.len() as f64;
    assert!((volume_share - 0.45).abs() <= 0.05);
}

#[test]
fn test_revenue_is_concentrated() {
    let config = GeneratorConfig::default().with_records(20_000).with_seed(42);
    let table = TransactionGenerator::new(config).expect("valid config").generate();
    let report = Aggregator::default().summarize(&table);

    assert!(report.concentration.top_share > 0.4);
    assert!(report.repeat_purchase_rate > 0.0 && report.repeat_purchase_rate < 1.0);
    assert_eq!(
        report.concentration.distinct_customers,
        report.metrics.total_customers
    );
}

#[test]
fn test_reproducible_across_runs() {
    let a = TransactionGenerator::new(scenario_config()).unwrap().generate();
    let b = TransactionGenerator::new(scenario_config()).unwrap().generate();
    assert_eq!(a, b);
    assert_eq!(
        Aggregator::default().summarize(&a),
        Aggregator::default().summarize(&b)
    );
}

#[test]
fn test_csv_file_reload_preserves_summaries() {
    let table = TransactionGenerator::new(scenario_config()).unwrap().generate();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sales.csv");

    export::write_csv_path(&table, &path).expect("export");
    let reloaded = export::read_csv_path(&path).expect("import");

    assert_eq!(reloaded, table);
    assert_eq!(
        Aggregator::default().summarize(&reloaded),
        Aggregator::default().summarize(&table)
    );
}

#[test]
fn test_clean_then_aggregate() {
    let table = TransactionGenerator::new(scenario_config()).unwrap().generate();
    let (cleaned, report) =
        clean(table.records(), &CleaningOptions::default()).expect("clean");

    assert_eq!(report.duplicates_removed, 0);
    assert!(report.outliers_removed >= 1);
    assert!(report.outliers_removed <= 20);
    assert_eq!(cleaned.len(), report.output_rows);

    let summary = Aggregator::default().summarize(&cleaned);
    assert!(summary.metrics.total_revenue_cents < table.total_revenue_cents());
}

#[test]
fn test_report_serializes_to_json() {
    let table = TransactionGenerator::new(scenario_config()).unwrap().generate();
    let report = Aggregator::default().summarize(&table);
    let json = serde_json::to_value(&report).expect("serialize");

    assert_eq!(json["degenerate"], false);
    assert_eq!(json["metrics"]["total_orders"], 1_000);
    assert_eq!(json["by_category"].as_array().map(|a| a.len()), Some(6));
}
