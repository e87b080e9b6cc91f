//! Tabular Dataset Preparation Library
//!
//! Normalizes heterogeneous raw tabular files into a common shape: named
//! columns, no missing cells, and numeric columns standardized to zero mean
//! and unit variance.
//!
//! # Overview
//!
//! - **Raw Text Normalization**: prepend a header to header-less files, or
//!   drop a leading identifier field and strip placeholder/whitespace noise
//! - **Loading**: CSV parsing and numeric/categorical classification via Polars
//! - **Imputation**: mean for numeric columns, mode for categorical columns
//! - **Standardization**: `(v - mean) / sqrt(var + 1e-9)` on numeric columns
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tabular_prep::{DatasetSpec, prepare_dataset};
//!
//! let prepared = prepare_dataset(&DatasetSpec::kidney("."))?;
//! println!("{:?} cleaned, {} cells filled",
//!     prepared.table.shape(),
//!     prepared.report.total_cells_filled);
//! ```
//!
//! Cleaning an already-loaded table:
//!
//! ```rust,ignore
//! use tabular_prep::{Column, Table, TableCleaner};
//!
//! let table = Table::new(vec![
//!     Column::numeric("bp", vec![Some(80.0), None, Some(70.0)]),
//!     Column::categorical("htn", vec![Some("yes"), Some("yes"), None]),
//! ])?;
//! let (cleaned, report) = TableCleaner::new().clean(table)?;
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{STANDARDIZATION_EPSILON, StandardScaler, TableCleaner};
pub use config::{ConfigValidationError, DatasetSpec, DatasetSpecBuilder, NormalizationStrategy};
pub use error::{PreprocessingError, Result as PreprocessingResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use loader::{parse_table, read_table, write_table};
pub use normalizer::{ensure_normalized, prepend_header, strip_id_and_noise};
pub use pipeline::{PreparedDataset, prepare_all, prepare_dataset};
pub use types::{
    CleaningReport, Column, ColumnData, ColumnKind, ColumnReport, FillValue, Scaling, Table,
};
