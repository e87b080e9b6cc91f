//! Table cleaning: imputation followed by standardization.
//!
//! A cleaning pass runs in four steps:
//! 1. Compute every column's fill value from the table as loaded
//! 2. Locate every missing cell
//! 3. Fill each missing cell with its column's step-1 value
//! 4. Rescale numeric columns to zero mean and unit variance, using
//!    statistics recomputed from the filled column
//!
//! Categorical columns are filled but never rescaled.

mod scaler;

pub use scaler::{STANDARDIZATION_EPSILON, StandardScaler};

use crate::error::{PreprocessingError, Result};
use crate::imputers::StatisticalImputer;
use crate::types::{CleaningReport, ColumnData, ColumnReport, Scaling, Table};
use tracing::{debug, info};

/// Fills missing cells and standardizes numeric columns.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableCleaner;

impl TableCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Run a full cleaning pass and return the cleaned table with a report.
    ///
    /// The output has the same rows, columns and column order as the input.
    pub fn clean(&self, table: Table) -> Result<(Table, CleaningReport)> {
        let mut table = table;
        let mut processing_steps = Vec::new();

        info!(
            "Cleaning table with {} rows and {} columns...",
            table.height(),
            table.width()
        );

        let fill_values = StatisticalImputer::fill_values(&table)?;

        let missing = table.missing_cells();
        debug!("Found {} missing cells", missing.len());

        let filled = StatisticalImputer::apply(&mut table, &fill_values, &missing, &mut processing_steps)?;

        let scalings = self.standardize(&mut table, &mut processing_steps)?;

        let columns: Vec<ColumnReport> = table
            .columns()
            .iter()
            .zip(fill_values)
            .zip(filled.iter().zip(scalings))
            .map(|((column, fill_value), (cells_filled, scaling))| ColumnReport {
                name: column.name.clone(),
                kind: column.kind(),
                fill_value,
                cells_filled: *cells_filled,
                scaling,
            })
            .collect();

        let report = CleaningReport {
            rows: table.height(),
            total_cells_filled: filled.iter().sum(),
            columns,
            processing_steps,
        };

        info!(
            "Cleaning complete: {} cells filled, {} columns standardized",
            report.total_cells_filled,
            report.standardized_columns().count()
        );

        Ok((table, report))
    }

    /// Rescale every numeric column in place.
    ///
    /// Must run after imputation: a missing numeric cell here is an error.
    pub fn standardize(
        &self,
        table: &mut Table,
        processing_steps: &mut Vec<String>,
    ) -> Result<Vec<Option<Scaling>>> {
        let mut scalings = Vec::with_capacity(table.width());

        for column in table.columns_mut() {
            let name = column.name.clone();
            match &mut column.data {
                ColumnData::Numeric(values) => {
                    let mut dense: Vec<f64> = values
                        .iter()
                        .map(|v| v.ok_or_else(|| PreprocessingError::UnfilledCells(name.clone())))
                        .collect::<Result<_>>()?;

                    let scaler = StandardScaler::fit(&dense);
                    scaler.transform_in_place(&mut dense);
                    *values = dense.into_iter().map(Some).collect();

                    let scaling = scaler.scaling();
                    debug!(
                        "Standardized '{}' (mean {:.4}, std {:.4})",
                        name, scaling.mean, scaling.std
                    );
                    processing_steps.push(format!(
                        "Standardized '{}' with mean {:.4} and std {:.4}",
                        name, scaling.mean, scaling.std
                    ));
                    scalings.push(Some(scaling));
                }
                ColumnData::Categorical(_) => scalings.push(None),
            }
        }

        Ok(scalings)
    }
}
