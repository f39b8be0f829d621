//! Tuck CLI binary.
//!
//! Downloads cleaned factor datasets from the Ken French data library and
//! prints them, exports them as CSV or summarizes them as JSON.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use polars::prelude::*;
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt};
use tuck::{DataLibraryResolver, FactorSet, FamaFrench, Frequency, LinkResolver};

#[derive(Parser)]
#[command(name = "tuck")]
#[command(about = "Cleaned factor datasets from the Ken French data library", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and clean a factor dataset
    Fetch {
        /// Dataset: ff3, mom, carhart or ff5
        dataset: String,

        /// Data frequency: daily, monthly or annual
        #[arg(long, default_value = "monthly")]
        frequency: String,

        /// Write the full table as CSV to this path instead of printing
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print a JSON summary instead of the table
        #[arg(long)]
        json: bool,
    },

    /// Resolve and print the current download URLs
    Sources {
        /// Restrict to one frequency
        #[arg(long)]
        frequency: Option<String>,
    },
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            dataset,
            frequency,
            output,
            json,
        } => {
            let frequency = parse_frequency(&frequency)?;
            let table = fetch_table(&dataset, frequency)?;

            if let Some(path) = output {
                write_csv(&table, &path)?;
                println!("wrote {} rows to {}", table.height(), path.display());
            } else if json {
                print_summary(&table, &dataset, frequency)?;
            } else {
                println!("{table}");
            }
        }

        Commands::Sources { frequency } => {
            let frequencies = match frequency {
                Some(f) => vec![parse_frequency(&f)?],
                None => Frequency::all(),
            };

            let resolver = DataLibraryResolver::shared();
            for dataset in FactorSet::all() {
                for &frequency in &frequencies {
                    let url = resolver.resolve(dataset, frequency)?;
                    println!("{dataset} ({frequency}): {url}");
                }
            }
        }
    }

    Ok(())
}

fn fetch_table(dataset: &str, frequency: Frequency) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("fetching {dataset} {frequency} data"));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let client = FamaFrench::new()?;
    let table = match dataset.to_ascii_lowercase().as_str() {
        "ff3" | "3" | "three" => client.three_factor(frequency)?,
        "mom" | "momentum" => client.momentum(frequency)?,
        "carhart" | "ff4" | "4" => client.carhart_four_factor(frequency)?,
        "ff5" | "5" | "five" => client.five_factor(frequency)?,
        other => {
            spinner.finish_and_clear();
            return Err(format!("unknown dataset {other:?}, expected ff3, mom, carhart or ff5").into());
        }
    };

    spinner.finish_and_clear();
    Ok(table)
}

fn parse_frequency(raw: &str) -> Result<Frequency, String> {
    match raw.to_ascii_lowercase().as_str() {
        "d" | "daily" => Ok(Frequency::Daily),
        "m" | "monthly" => Ok(Frequency::Monthly),
        "a" | "annual" | "yearly" => Ok(Frequency::Annual),
        other => Err(format!(
            "unknown frequency {other:?}, expected daily, monthly or annual"
        )),
    }
}

fn write_csv(table: &DataFrame, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;

    let names = table.get_column_names();
    writer.write_record(names.iter().map(|name| name.as_str()))?;

    let dates = table.column("Date")?.cast(&DataType::String)?;
    let dates = dates.str()?;

    let mut value_columns = Vec::with_capacity(names.len().saturating_sub(1));
    for name in names.iter().skip(1) {
        value_columns.push(table.column(name.as_str())?.f64()?);
    }

    let mut record: Vec<String> = Vec::with_capacity(names.len());
    for row in 0..table.height() {
        record.clear();
        record.push(dates.get(row).unwrap_or_default().to_string());
        for column in &value_columns {
            // null cells (unmatched MOM dates in Carhart tables) export empty
            record.push(column.get(row).map(|v| v.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn print_summary(
    table: &DataFrame,
    dataset: &str,
    frequency: Frequency,
) -> Result<(), Box<dyn std::error::Error>> {
    let dates = table.column("Date")?.cast(&DataType::String)?;
    let dates = dates.str()?;

    let summary = json!({
        "dataset": dataset,
        "frequency": frequency.as_str(),
        "rows": table.height(),
        "columns": table
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>(),
        "start": dates.get(0),
        "end": dates.get(table.height().saturating_sub(1)),
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
