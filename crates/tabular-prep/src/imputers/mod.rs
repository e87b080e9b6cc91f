//! Imputation module for handling missing values.
//!
//! Fill values are mean for numeric columns and mode for categorical ones,
//! always computed from the table as it was before any cell is filled.

mod statistical;

pub use statistical::StatisticalImputer;
