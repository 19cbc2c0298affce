//! SalesDash CLI - synthesize or load e-commerce transactions and print revenue summaries.
//!
//! # Examples
//!
//! ```bash
//! # 50,000 synthetic orders with the default profile
//! salesdash
//!
//! # Smaller, reproducible run exported for a charting tool
//! salesdash --records 1000 --seed 42 --output sales.csv --json report.json
//!
//! # Summarize an existing export after dropping duplicates and outliers
//! salesdash --input sales.csv --clean
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use salesdash::analytics::Aggregator;
use salesdash::cleaning::{clean, CleaningOptions};
use salesdash::export;
use salesdash::factory::TransactionGenerator;
use salesdash::types::TransactionTable;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod output;

use config::Overrides;
use error::{CliError, CliResult};

/// SalesDash - synthetic e-commerce sales analytics
#[derive(Parser)]
#[command(name = "salesdash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of transactions to synthesize
    #[arg(short = 'n', long)]
    records: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// First order date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last order date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Generator configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load transactions from a CSV export instead of synthesizing
    #[arg(short, long, conflicts_with_all = ["records", "seed", "start", "end", "config"])]
    input: Option<PathBuf>,

    /// Write the transaction table as CSV
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the summary report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Drop duplicate order ids and revenue outliers before aggregating
    #[arg(long)]
    clean: bool,

    /// Percentage of customers counted as top customers
    #[arg(long, default_value_t = 20.0)]
    top_percent: f64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn print_banner() {
    println!(
        "  {} {}\n",
        "SalesDash".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}

fn top_fraction(percent: f64) -> CliResult<f64> {
    if percent.is_finite() && percent > 0.0 && percent <= 100.0 {
        Ok(percent / 100.0)
    } else {
        Err(CliError::InvalidArgument(format!(
            "--top-percent must be in (0, 100], got {}",
            percent
        )))
    }
}

fn load_table(cli: &Cli) -> CliResult<TransactionTable> {
    if let Some(input) = &cli.input {
        info!(path = %input.display(), "Loading transactions");
        if cli.clean {
            let records = export::read_records_path(input)?;
            let (table, report) = clean(&records, &CleaningOptions::default())?;
            if !cli.quiet {
                output::print_cleaning(&report);
            }
            return Ok(table);
        }
        return Ok(export::read_csv_path(input)?);
    }

    let overrides = Overrides {
        records: cli.records,
        seed: cli.seed,
        start: cli.start,
        end: cli.end,
    };
    let config = config::resolve(cli.config.as_deref(), &overrides)?;
    let mut generator = TransactionGenerator::new(config)?;
    let table = generator.generate();

    if cli.clean {
        let (cleaned, report) = clean(table.records(), &CleaningOptions::default())?;
        if !cli.quiet {
            output::print_cleaning(&report);
        }
        return Ok(cleaned);
    }
    Ok(table)
}

fn run(cli: &Cli) -> CliResult<()> {
    let aggregator = Aggregator::with_top_fraction(top_fraction(cli.top_percent)?);
    let table = load_table(cli)?;

    if let Some(path) = &cli.output {
        export::write_csv_path(&table, path)?;
    }

    let report = aggregator.summarize(&table);
    if !cli.quiet {
        output::print_report(&report);
    }

    if let Some(path) = &cli.json {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "Wrote summary report");
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if !cli.quiet {
        print_banner();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
