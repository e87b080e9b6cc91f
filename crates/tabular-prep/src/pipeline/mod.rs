//! End-to-end preparation of one dataset.
//!
//! normalize (once) → parse → impute → standardize.

use crate::cleaner::TableCleaner;
use crate::config::DatasetSpec;
use crate::error::{Result, ResultExt};
use crate::loader::read_table;
use crate::normalizer::ensure_normalized;
use crate::types::{CleaningReport, Table};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// A cleaned dataset and what was done to produce it.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedDataset {
    pub name: String,
    pub table: Table,
    pub report: CleaningReport,
    /// Whether the raw file was normalized during this run.
    pub normalized_now: bool,
    pub duration_ms: u64,
}

/// Prepare a single dataset.
///
/// The definition is validated first; normalization is skipped when the
/// cleaned file already exists.
pub fn prepare_dataset(spec: &DatasetSpec) -> Result<PreparedDataset> {
    let start = Instant::now();
    spec.validate()?;

    let normalized_now = ensure_normalized(spec)?;

    let table = read_table(&spec.cleaned_path, spec.delimiter)
        .context(format!("Loading dataset '{}'", spec.name))?;
    info!(
        "Dataset '{}' loaded: {:?} with {} missing cells",
        spec.name,
        table.shape(),
        table.missing_count()
    );

    let (table, report) = TableCleaner::new()
        .clean(table)
        .context(format!("Cleaning dataset '{}'", spec.name))?;

    Ok(PreparedDataset {
        name: spec.name.clone(),
        table,
        report,
        normalized_now,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Prepare several datasets in order, stopping at the first failure.
pub fn prepare_all(specs: &[DatasetSpec]) -> Result<Vec<PreparedDataset>> {
    specs.iter().map(prepare_dataset).collect()
}
