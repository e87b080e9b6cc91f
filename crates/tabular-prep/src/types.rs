//! Core data types: the in-memory table and the cleaning report.

use crate::error::{PreprocessingError, Result};
use serde::{Deserialize, Serialize};

/// Declared kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Cell values of a single column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            ColumnData::Numeric(values) => matches!(values.get(row), Some(None)),
            ColumnData::Categorical(values) => matches!(values.get(row), Some(None)),
        }
    }

    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(flatten)]
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Categorical(
                values.into_iter().map(|v| v.map(Into::into)).collect(),
            ),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Rectangular table of named columns.
///
/// All columns have the same length and names are unique; both are checked
/// by [`Table::new`] so the rest of the crate can index rows freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, rejecting ragged columns and duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for (idx, column) in columns.iter().enumerate() {
                if column.len() != expected {
                    return Err(PreprocessingError::ShapeMismatch {
                        column: column.name.clone(),
                        expected,
                        actual: column.len(),
                    });
                }
                if columns[..idx].iter().any(|c| c.name == column.name) {
                    return Err(PreprocessingError::DuplicateColumn(column.name.clone()));
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Every missing cell as `(row, column index)`, row-major.
    pub fn missing_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..self.height() {
            for (col_idx, column) in self.columns.iter().enumerate() {
                if column.data.is_missing(row) {
                    cells.push((row, col_idx));
                }
            }
        }
        cells
    }

    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(|c| c.data.missing_count()).sum()
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

static_assertions::assert_impl_all!(Table: Send, Sync);

/// Per-column value substituted for every missing cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for FillValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillValue::Number(v) => write!(f, "{:.4}", v),
            FillValue::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// What the cleaner did to one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnReport {
    pub name: String,
    pub kind: ColumnKind,
    pub fill_value: FillValue,
    pub cells_filled: usize,
    /// Mean and standard deviation used for scaling, numeric columns only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaling: Option<Scaling>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scaling {
    pub mean: f64,
    pub std: f64,
}

/// Summary of one cleaning pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows: usize,
    pub columns: Vec<ColumnReport>,
    pub total_cells_filled: usize,
    pub processing_steps: Vec<String>,
}

impl CleaningReport {
    pub fn standardized_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.scaling.is_some())
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("age", vec![Some(48.0), None, Some(62.0)]),
            Column::categorical("rbc", vec![None, Some("normal"), Some("normal")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape() {
        let table = sample_table();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.column_names(), vec!["age", "rbc"]);
    }

    #[test]
    fn test_missing_cells_row_major() {
        let table = sample_table();
        assert_eq!(table.missing_cells(), vec![(0, 1), (1, 0)]);
        assert_eq!(table.missing_count(), 2);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::numeric("b", vec![Some(1.0)]),
        ]);
        assert!(matches!(
            result.unwrap_err(),
            PreprocessingError::ShapeMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Table::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::categorical("a", vec![Some("x")]),
        ]);
        assert!(matches!(
            result.unwrap_err(),
            PreprocessingError::DuplicateColumn(name) if name == "a"
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.shape(), (0, 0));
        assert!(table.missing_cells().is_empty());
    }

    #[test]
    fn test_column_serialization() {
        let column = Column::numeric("bp", vec![Some(80.0), None]);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["name"], "bp");
        assert_eq!(json["kind"], "numeric");
        assert_eq!(json["values"][1], serde_json::Value::Null);
    }

    #[test]
    fn test_fill_value_display() {
        assert_eq!(FillValue::Number(2.0).to_string(), "2.0000");
        assert_eq!(FillValue::Text("yes".to_string()).to_string(), "'yes'");
    }
}
