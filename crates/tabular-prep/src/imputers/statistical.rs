//! Statistical imputation: mean for numeric columns, mode for categorical ones.

use crate::error::{PreprocessingError, Result};
use crate::types::{Column, ColumnData, FillValue, Table};
use crate::utils::{numeric_mean, string_mode};
use std::collections::HashSet;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Compute the fill value of a single column.
    ///
    /// Fails with [`PreprocessingError::NoValidValues`] when the column has
    /// no non-missing value to take a mean or mode from.
    pub fn fill_value(column: &Column) -> Result<FillValue> {
        match &column.data {
            ColumnData::Numeric(values) => numeric_mean(values)
                .map(FillValue::Number)
                .ok_or_else(|| PreprocessingError::NoValidValues(column.name.clone())),
            ColumnData::Categorical(values) => string_mode(values)
                .map(FillValue::Text)
                .ok_or_else(|| PreprocessingError::NoValidValues(column.name.clone())),
        }
    }

    /// Compute one fill value per column, in column order.
    pub fn fill_values(table: &Table) -> Result<Vec<FillValue>> {
        table
            .columns()
            .iter()
            .map(|column| {
                let value = Self::fill_value(column)?;
                debug!("Fill value for '{}': {}", column.name, value);
                Ok(value)
            })
            .collect()
    }

    /// Write the precomputed fill value into every listed `(row, column)` cell.
    ///
    /// Returns the number of cells filled per column. Fill values are taken
    /// as given, so the order of `cells` has no effect on the result. A
    /// repeated cell is filled and counted once. A cell outside the table, a
    /// cell that already holds a value, or a fill value of the wrong kind
    /// fails with [`PreprocessingError::Internal`].
    pub fn apply(
        table: &mut Table,
        fill_values: &[FillValue],
        cells: &[(usize, usize)],
        processing_steps: &mut Vec<String>,
    ) -> Result<Vec<usize>> {
        let mut filled = vec![0usize; table.width()];
        let mut seen = HashSet::with_capacity(cells.len());

        for &(row, col_idx) in cells {
            if !seen.insert((row, col_idx)) {
                continue;
            }

            let column = table.columns_mut().get_mut(col_idx).ok_or_else(|| {
                PreprocessingError::Internal(format!("column index {} out of range", col_idx))
            })?;
            let fill_value = fill_values.get(col_idx).ok_or_else(|| {
                PreprocessingError::Internal(format!("no fill value for column '{}'", column.name))
            })?;

            let was_missing = match (&mut column.data, fill_value) {
                (ColumnData::Numeric(values), FillValue::Number(v)) => values
                    .get_mut(row)
                    .map(|cell| cell.replace(*v).is_none()),
                (ColumnData::Categorical(values), FillValue::Text(s)) => values
                    .get_mut(row)
                    .map(|cell| cell.replace(s.clone()).is_none()),
                _ => {
                    return Err(PreprocessingError::Internal(format!(
                        "fill value {} does not match kind of column '{}'",
                        fill_value, column.name
                    )));
                }
            };

            match was_missing {
                Some(true) => filled[col_idx] += 1,
                Some(false) => {
                    return Err(PreprocessingError::Internal(format!(
                        "row {} of column '{}' is not missing",
                        row, column.name
                    )));
                }
                None => {
                    return Err(PreprocessingError::Internal(format!(
                        "row {} out of range for column '{}'",
                        row, column.name
                    )));
                }
            }
        }

        for (column, (count, fill_value)) in table
            .columns()
            .iter()
            .zip(filled.iter().zip(fill_values))
        {
            if *count > 0 {
                let method = match fill_value {
                    FillValue::Number(_) => "mean",
                    FillValue::Text(_) => "mode",
                };
                processing_steps.push(format!(
                    "Filled {} missing cells in '{}' with {}: {}",
                    count, column.name, method, fill_value
                ));
            }
        }

        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========================================================================
    // fill_value() tests
    // ========================================================================

    #[test]
    fn test_fill_value_numeric_mean() {
        let column = Column::numeric("values", vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(
            StatisticalImputer::fill_value(&column).unwrap(),
            FillValue::Number(2.0)
        );
    }

    #[test]
    fn test_fill_value_categorical_mode() {
        let column = Column::categorical("flag", vec![Some("a"), Some("a"), None, Some("b")]);
        assert_eq!(
            StatisticalImputer::fill_value(&column).unwrap(),
            FillValue::Text("a".to_string())
        );
    }

    #[test]
    fn test_fill_value_all_missing_numeric() {
        let column = Column::numeric("empty", vec![None, None]);
        let err = StatisticalImputer::fill_value(&column).unwrap_err();
        assert!(matches!(err, PreprocessingError::NoValidValues(name) if name == "empty"));
    }

    #[test]
    fn test_fill_value_all_missing_categorical() {
        let column = Column::categorical("empty", vec![None::<String>]);
        assert!(StatisticalImputer::fill_value(&column).is_err());
    }

    // ========================================================================
    // apply() tests
    // ========================================================================

    #[test]
    fn test_apply_fills_listed_cells() {
        let mut table = Table::new(vec![
            Column::numeric("bp", vec![Some(80.0), None, Some(70.0)]),
            Column::categorical("rbc", vec![None, Some("normal"), Some("abnormal")]),
        ])
        .unwrap();
        let fill_values = StatisticalImputer::fill_values(&table).unwrap();
        let cells = table.missing_cells();
        let mut steps = Vec::new();

        let filled = StatisticalImputer::apply(&mut table, &fill_values, &cells, &mut steps).unwrap();

        assert_eq!(filled, vec![1, 1]);
        assert_eq!(table.missing_count(), 0);
        assert_eq!(
            table.columns()[0].data,
            ColumnData::Numeric(vec![Some(80.0), Some(75.0), Some(70.0)])
        );
        assert_eq!(
            table.columns()[1].data,
            ColumnData::Categorical(vec![
                Some("normal".to_string()),
                Some("normal".to_string()),
                Some("abnormal".to_string()),
            ])
        );
        assert_eq!(steps.len(), 2);
        assert!(steps[0].contains("'bp'"));
        assert!(steps[0].contains("mean"));
        assert!(steps[1].contains("mode"));
    }

    #[test]
    fn test_apply_no_missing_logs_nothing() {
        let mut table = Table::new(vec![Column::numeric("a", vec![Some(1.0), Some(2.0)])]).unwrap();
        let fill_values = StatisticalImputer::fill_values(&table).unwrap();
        let mut steps = Vec::new();

        let filled = StatisticalImputer::apply(&mut table, &fill_values, &[], &mut steps).unwrap();

        assert_eq!(filled, vec![0]);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_apply_rejects_mismatched_fill_value() {
        let mut table = Table::new(vec![Column::numeric("a", vec![None, Some(2.0)])]).unwrap();
        let mut steps = Vec::new();

        let result = StatisticalImputer::apply(
            &mut table,
            &[FillValue::Text("x".to_string())],
            &[(0, 0)],
            &mut steps,
        );

        assert!(matches!(result, Err(PreprocessingError::Internal(_))));
    }

    #[test]
    fn test_apply_rejects_row_out_of_range() {
        let mut table = Table::new(vec![Column::numeric("a", vec![None, Some(2.0)])]).unwrap();
        let fill_values = StatisticalImputer::fill_values(&table).unwrap();

        let err = StatisticalImputer::apply(&mut table, &fill_values, &[(99, 0)], &mut Vec::new())
            .unwrap_err();

        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(table.missing_count(), 1);
    }

    #[test]
    fn test_apply_rejects_column_out_of_range() {
        let mut table = Table::new(vec![Column::numeric("a", vec![None, Some(2.0)])]).unwrap();
        let fill_values = StatisticalImputer::fill_values(&table).unwrap();

        let err = StatisticalImputer::apply(&mut table, &fill_values, &[(0, 3)], &mut Vec::new())
            .unwrap_err();

        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_apply_rejects_present_cell() {
        let mut table = Table::new(vec![Column::numeric("a", vec![None, Some(2.0)])]).unwrap();
        let fill_values = StatisticalImputer::fill_values(&table).unwrap();

        let err = StatisticalImputer::apply(&mut table, &fill_values, &[(1, 0)], &mut Vec::new())
            .unwrap_err();

        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_apply_counts_repeated_cell_once() {
        let mut table = Table::new(vec![Column::categorical(
            "rbc",
            vec![None, Some("normal"), None],
        )])
        .unwrap();
        let fill_values = StatisticalImputer::fill_values(&table).unwrap();
        let mut steps = Vec::new();

        let filled = StatisticalImputer::apply(
            &mut table,
            &fill_values,
            &[(0, 0), (2, 0), (0, 0)],
            &mut steps,
        )
        .unwrap();

        assert_eq!(filled, vec![2]);
        assert_eq!(table.missing_count(), 0);
        assert!(steps[0].starts_with("Filled 2 missing cells"));
    }
}
