//! Terminal rendering of summary tables.

use colored::Colorize;
use salesdash::analytics::{GroupRevenue, PeriodRevenue, SalesReport};
use salesdash::cleaning::CleaningReport;
use salesdash::types::{format_customer_id, Region};

const BAR_WIDTH: usize = 30;

/// Print every summary table.
pub fn print_report(report: &SalesReport) {
    if report.degenerate {
        println!(
            "{} Input table is empty; all summaries are zero",
            "Warning:".yellow()
        );
        println!();
    }

    heading("Key Metrics");
    let m = &report.metrics;
    field("Total Revenue", money(m.total_revenue_cents));
    field("Total Orders", thousands(m.total_orders as u64));
    field("Average Order Value", money_f(m.average_order_value_cents));
    field("Total Customers", thousands(m.total_customers as u64));
    field("Customer Lifetime Value", money_f(m.customer_lifetime_value_cents));
    println!();

    heading("Revenue by Category");
    print_groups(&report.by_category);

    heading("Revenue by Region");
    print_groups(&report.by_region);

    heading("Revenue by Customer Segment");
    print_groups(&report.by_segment);

    heading("Revenue by Quarter");
    print_periods(&report.by_quarter);

    heading("Monthly Revenue Trend");
    print_periods(&report.by_month);

    heading("Category x Region Revenue");
    let header: Vec<String> = Region::ALL.iter().map(|r| format!("{:>14}", r.name())).collect();
    println!("    {:<16}{}", "", header.join("").dimmed());
    for row in &report.category_region {
        let cells: Vec<String> = row
            .revenue_cents
            .iter()
            .map(|c| format!("{:>14}", money(*c)))
            .collect();
        println!("    {:<16}{}", row.category.name(), cells.join(""));
    }
    println!();

    heading("Customer Concentration");
    let c = &report.concentration;
    field(
        &format!("Top {:.0}% customers", c.top_fraction * 100.0),
        format!(
            "{} of {} customers, {} ({})",
            thousands(c.top_customers as u64),
            thousands(c.distinct_customers as u64),
            money(c.top_revenue_cents),
            percent(c.top_share)
        ),
    );
    field("Repeat Purchase Rate", percent(report.repeat_purchase_rate));
    for (rank, leader) in c.leaders.iter().enumerate() {
        println!(
            "    {:>3}. {}  {:>14}  cumulative {}",
            rank + 1,
            format_customer_id(leader.customer_id),
            money(leader.revenue_cents),
            percent(leader.cumulative_share).dimmed()
        );
    }
    println!();

    heading("RFM Segments");
    if let Some(reference) = report.rfm.reference_date {
        println!("    {} recency measured from {}", "•".dimmed(), reference);
    }
    for bucket in &report.rfm.buckets {
        println!(
            "    {:<12} {:>8} customers  {:>16}  {}",
            bucket.segment.name(),
            thousands(bucket.customers as u64),
            money(bucket.revenue_cents),
            bar(bucket.share)
        );
    }
    println!();

    heading("Key Insights");
    let i = &report.insights;
    let none = || "n/a".to_string();
    field(
        "Top Category",
        i.top_category
            .map(|c| format!("{} ({})", c, money(i.top_category_revenue_cents)))
            .unwrap_or_else(none),
    );
    field(
        "Peak Sales Month",
        i.peak_month.map(|m| m.to_string()).unwrap_or_else(none),
    );
    field(
        "Best Performing Region",
        i.best_region.map(|r| r.to_string()).unwrap_or_else(none),
    );
    field("Repeat Customer Rate", percent(i.repeat_purchase_rate));
    field(
        &format!("Top {:.0}% customers generate", c.top_fraction * 100.0),
        percent(i.top_customer_share),
    );
    println!();
}

/// Print what the cleaning pass dropped.
pub fn print_cleaning(report: &CleaningReport) {
    heading("Data Cleaning");
    field("Input rows", thousands(report.input_rows as u64));
    field("Duplicates removed", thousands(report.duplicates_removed as u64));
    if let Some(limit) = report.outlier_threshold_cents {
        field("Outlier cut-off", money_f(limit));
    }
    field("Outliers removed", thousands(report.outliers_removed as u64));
    field("Rows kept", thousands(report.output_rows as u64));
    println!();
}

fn print_groups<K: std::fmt::Display>(rows: &[GroupRevenue<K>]) {
    for row in rows {
        println!(
            "    {:<16}{:>16} {:>8} orders  {:>7}  {}",
            row.key.to_string(),
            money(row.revenue_cents),
            thousands(row.orders as u64),
            percent(row.share),
            bar(row.share)
        );
    }
    println!();
}

fn print_periods<P: std::fmt::Display>(rows: &[PeriodRevenue<P>]) {
    let max = rows.iter().map(|r| r.revenue_cents).max().unwrap_or(0);
    for row in rows {
        let scale = if max == 0 {
            0.0
        } else {
            row.revenue_cents as f64 / max as f64
        };
        println!(
            "    {:<10}{:>16} {:>8} orders  {}",
            row.period.to_string(),
            money(row.revenue_cents),
            thousands(row.orders as u64),
            bar(scale)
        );
    }
    println!();
}

fn heading(title: &str) {
    println!("{}:", title.bright_white().underline());
}

fn field(label: &str, value: String) {
    println!("  {} {}: {}", "•".dimmed(), label, value.bright_yellow());
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled).bright_cyan().to_string()
}

/// `$1,234.56` from whole cents.
pub fn money(cents: u64) -> String {
    format!("${}.{:02}", thousands(cents / 100), cents % 100)
}

/// `$1,234.56` from fractional cents, rounded to the cent.
pub fn money_f(cents: f64) -> String {
    money(cents.max(0.0).round() as u64)
}

/// `12.3%`
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// `1,234,567`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
