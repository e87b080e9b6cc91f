//! Shared utilities for the preprocessing pipeline.
//!
//! Dtype classification for the polars boundary and the column statistics
//! used by both imputation and standardization.

use crate::types::ColumnKind;
use polars::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Map a polars dtype onto the two kinds the cleaner distinguishes.
///
/// Anything that is not a number (strings, booleans, dates) is categorical.
pub fn column_kind_for_dtype(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

// =============================================================================
// Column Statistics Utilities
// =============================================================================

/// Arithmetic mean of the non-missing values, `None` if there are none.
pub fn numeric_mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Sample variance (n - 1 denominator) around a known mean.
///
/// A single value has no spread to estimate, so it yields 0.0.
pub fn sample_variance(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

/// Most frequent non-missing value.
///
/// Ties go to the value seen first, so the result never depends on hash
/// iteration order.
pub fn string_mode(values: &[Option<String>]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.iter().flatten().enumerate() {
        counts
            .entry(value.as_str())
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_column_kind_for_dtype() {
        assert_eq!(column_kind_for_dtype(&DataType::UInt8), ColumnKind::Numeric);
        assert_eq!(column_kind_for_dtype(&DataType::String), ColumnKind::Categorical);
        assert_eq!(column_kind_for_dtype(&DataType::Boolean), ColumnKind::Categorical);
    }

    #[test]
    fn test_numeric_mean_skips_missing() {
        assert_eq!(numeric_mean(&[Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(numeric_mean(&[None, None]), None);
        assert_eq!(numeric_mean(&[]), None);
    }

    #[test]
    fn test_sample_variance() {
        let values = [1.0, 2.0, 3.0];
        assert!((sample_variance(&values, 2.0) - 1.0).abs() < 1e-12);
        assert_eq!(sample_variance(&[5.0], 5.0), 0.0);
        assert_eq!(sample_variance(&[4.0, 4.0, 4.0], 4.0), 0.0);
    }

    #[test]
    fn test_string_mode() {
        let values: Vec<Option<String>> = ["a", "b", "a", "c", "a"]
            .iter()
            .map(|s| Some(s.to_string()))
            .collect();
        assert_eq!(string_mode(&values), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_tie_prefers_first_seen() {
        let values = vec![
            None,
            Some("notpresent".to_string()),
            Some("present".to_string()),
            Some("present".to_string()),
            Some("notpresent".to_string()),
        ];
        assert_eq!(string_mode(&values), Some("notpresent".to_string()));

        let values = vec![Some("z".to_string()), Some("y".to_string()), Some("x".to_string())];
        assert_eq!(string_mode(&values), Some("z".to_string()));
    }

    #[test]
    fn test_string_mode_all_missing() {
        assert_eq!(string_mode(&[None, None]), None);
    }
}
