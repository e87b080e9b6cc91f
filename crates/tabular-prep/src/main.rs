//! CLI entry point: prepares the banknote and kidney datasets.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use tabular_prep::{DatasetSpec, PreparedDataset, prepare_dataset, write_table};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Normalize, impute and standardize the banknote and kidney datasets",
    long_about = "Normalizes the raw banknote and kidney disease files (once; existing \
                  cleaned files are reused), fills missing cells with column means or \
                  modes and standardizes numeric columns.\n\n\
                  EXAMPLES:\n  \
                  tabular-prep --data-dir data/\n  \
                  tabular-prep --data-dir data/ --output-dir out/ --json"
)]
struct Args {
    /// Directory holding data_banknote_authentication.txt and archive/kidney_disease.csv
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// Export every cleaned table as <name>_prepared.csv into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only show errors and the final summary
    #[arg(short, long)]
    quiet: bool,

    /// Print the cleaning reports as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// With JSON output logging is disabled so stdout only carries the report.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !args.data_dir.is_dir() {
        return Err(anyhow!("Data directory not found: {}", args.data_dir.display()));
    }

    let mut prepared = Vec::new();
    for spec in DatasetSpec::builtin(&args.data_dir) {
        match prepare_dataset(&spec) {
            Ok(dataset) => prepared.push(dataset),
            Err(e) => {
                error!("Dataset '{}' failed [{}]: {}", spec.name, e.error_code(), e);
                return Err(e.into());
            }
        }
    }

    if let Some(ref output_dir) = args.output_dir {
        export(&prepared, output_dir)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports_json(&prepared))?);
    } else {
        print_human_readable_summary(&prepared);
    }

    Ok(())
}

fn export(prepared: &[PreparedDataset], output_dir: &Path) -> Result<()> {
    for dataset in prepared {
        let path = output_dir.join(format!("{}_prepared.csv", dataset.name));
        write_table(&dataset.table, &path, ',')?;
        info!("Exported '{}' to {}", dataset.name, path.display());
    }
    Ok(())
}

fn reports_json(prepared: &[PreparedDataset]) -> serde_json::Value {
    serde_json::Value::Array(
        prepared
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.name,
                    "shape": d.table.shape(),
                    "normalized_now": d.normalized_now,
                    "duration_ms": d.duration_ms,
                    "report": d.report,
                })
            })
            .collect(),
    )
}

/// User-facing summary, printed regardless of log level.
fn print_human_readable_summary(prepared: &[PreparedDataset]) {
    println!("\n{}", "=".repeat(80));
    println!("DATASET PREPARATION SUMMARY");
    println!("{}", "=".repeat(80));

    for dataset in prepared {
        let (rows, cols) = dataset.table.shape();
        println!("\n{}", dataset.name.to_uppercase());
        println!("{}", "-".repeat(40));
        println!("  Shape:          {} rows x {} columns", rows, cols);
        println!(
            "  Normalization:  {}",
            if dataset.normalized_now { "performed" } else { "reused cached file" }
        );
        println!("  Cells filled:   {}", dataset.report.total_cells_filled);
        println!(
            "  Standardized:   {} columns",
            dataset.report.standardized_columns().count()
        );

        for column in dataset.report.columns.iter().filter(|c| c.cells_filled > 0) {
            println!(
                "    - {:<12} {:>4} filled with {}",
                column.name, column.cells_filled, column.fill_value
            );
        }
        println!("  Duration:       {} ms", dataset.duration_ms);
    }

    println!("\n{}", "=".repeat(80));
}
