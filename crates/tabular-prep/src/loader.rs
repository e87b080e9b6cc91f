//! Reading and writing tables through polars.
//!
//! Polars does the CSV parsing and dtype inference. A column whose every
//! non-missing value parses as a number arrives with a numeric dtype and
//! becomes [`ColumnData::Numeric`]; every other column is cast to strings
//! and becomes [`ColumnData::Categorical`].
//!
//! Missing cells are empty fields, NaN in numeric columns, and empty
//! strings in categorical columns. A field emptied by noise stripping is
//! therefore missing and gets imputed, not treated as its own category.

use crate::error::{PreprocessingError, Result, ResultExt};
use crate::types::{Column as TableColumn, ColumnData, ColumnKind, Table};
use crate::utils::column_kind_for_dtype;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// The CSV reader and writer take a single-byte separator.
fn separator(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        return Err(PreprocessingError::InvalidConfig(format!(
            "delimiter '{}' is not a single ASCII character",
            delimiter
        )));
    }
    Ok(delimiter as u8)
}

fn read_options(delimiter: char) -> Result<CsvReadOptions> {
    Ok(CsvReadOptions::default()
        .with_has_header(true)
        // Scan every row so one late non-numeric value makes the column categorical.
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_separator(separator(delimiter)?)))
}

/// Parse a delimited file with a header row into a [`Table`].
pub fn read_table(path: &Path, delimiter: char) -> Result<Table> {
    info!("Loading table from: {}", path.display());
    let df = read_options(delimiter)?
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Opening {}", path.display()))?
        .finish()
        .context(format!("Parsing {}", path.display()))?;
    debug!("Parsed {} with shape {:?}", path.display(), df.shape());
    Table::from_dataframe(&df)
}

/// Parse in-memory delimited text with a header row into a [`Table`].
pub fn parse_table(text: &str, delimiter: char) -> Result<Table> {
    let df = read_options(delimiter)?
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()
        .context("Parsing delimited text")?;
    Table::from_dataframe(&df)
}

/// Write a table as CSV with a header row.
pub fn write_table(table: &Table, path: &Path, delimiter: char) -> Result<()> {
    let separator_byte = separator(delimiter)?;
    let mut df = table.to_dataframe()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
    }
    let mut file =
        std::fs::File::create(path).context(format!("Creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator_byte)
        .finish(&mut df)
        .context(format!("Writing {}", path.display()))?;
    info!("Wrote {} rows to {}", table.height(), path.display());
    Ok(())
}

impl Table {
    /// Convert a polars DataFrame, classifying each column by its dtype.
    pub fn from_dataframe(df: &DataFrame) -> Result<Table> {
        let mut columns = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            let name = series.name().to_string();

            let data = match column_kind_for_dtype(series.dtype()) {
                ColumnKind::Numeric => {
                    let floats = series.cast(&DataType::Float64)?;
                    ColumnData::Numeric(
                        floats
                            .f64()?
                            .into_iter()
                            .map(|v| v.filter(|x| !x.is_nan()))
                            .collect(),
                    )
                }
                ColumnKind::Categorical => {
                    let strings = series.cast(&DataType::String)?;
                    ColumnData::Categorical(
                        strings
                            .str()?
                            .into_iter()
                            .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
                            .collect(),
                    )
                }
            };

            debug!("Column '{}' loaded as {:?}", name, data.kind());
            columns.push(TableColumn { name, data });
        }

        Table::new(columns)
    }

    /// Convert back into a polars DataFrame. Missing cells become nulls.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .columns()
            .iter()
            .map(|c| match &c.data {
                ColumnData::Numeric(values) => {
                    Column::from(Series::new(c.name.as_str().into(), values.as_slice()))
                }
                ColumnData::Categorical(values) => {
                    Column::from(Series::new(c.name.as_str().into(), values.as_slice()))
                }
            })
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}
