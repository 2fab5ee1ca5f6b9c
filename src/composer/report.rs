//! Column-oriented report tables and their CSV output.

use crate::composer::error::ReportError;
use log::info;
use polars::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// One report column.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportColumn {
    /// Time labels.
    Text(Vec<String>),
    /// Coordinates and reduced values.
    Numeric(Vec<f64>),
}

impl ReportColumn {
    pub fn len(&self) -> usize {
        match self {
            ReportColumn::Text(values) => values.len(),
            ReportColumn::Numeric(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, row: usize) -> Option<String> {
        match self {
            ReportColumn::Text(values) => values.get(row).cloned(),
            ReportColumn::Numeric(values) => values.get(row).map(|v| v.to_string()),
        }
    }

    fn to_column(&self, name: &str) -> Column {
        let series = match self {
            ReportColumn::Text(values) => Series::new(name.into(), values),
            ReportColumn::Numeric(values) => Series::new(name.into(), values),
        };
        Column::from(series)
    }
}

/// The tabular result of one report request.
///
/// Row `i` is the `i`-th value of every column; all columns have the same
/// length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    field_names: Vec<String>,
    columns: Vec<ReportColumn>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, rejecting it when its length differs from the
    /// columns already present.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column: ReportColumn,
    ) -> Result<(), ReportError> {
        let name = name.into();
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(ReportError::ColumnLength {
                    column: name,
                    expected: first.len(),
                    found: column.len(),
                });
            }
        }
        self.field_names.push(name);
        self.columns.push(column);
        Ok(())
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn columns(&self) -> &[ReportColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ReportColumn> {
        self.field_names
            .iter()
            .position(|field| field == name)
            .and_then(|i| self.columns.get(i))
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, ReportColumn::len)
    }

    /// Cells of row `index` as display strings.
    ///
    /// Numbers use `f64`'s `Display`, so `-27.0` reads `-27`. [`Report::write_csv`]
    /// goes through polars and keeps the fraction (`-27.0`).
    pub fn row(&self, index: usize) -> Option<Vec<String>> {
        self.columns.iter().map(|column| column.cell(index)).collect()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame, ReportError> {
        let columns = self
            .field_names
            .iter()
            .zip(&self.columns)
            .map(|(name, column)| column.to_column(name))
            .collect::<Vec<_>>();
        Ok(DataFrame::new(columns)?)
    }

    /// Writes a header row followed by one line per row.
    ///
    /// The table is written to a temporary file next to `path` and moved into
    /// place once complete, so a failure never leaves a partial file behind.
    pub fn write_csv(&self, path: &Path) -> Result<(), ReportError> {
        let mut frame = self.to_dataframe()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp_file =
            NamedTempFile::new_in(dir).map_err(|e| ReportError::OutputIo(dir.to_path_buf(), e))?;
        CsvWriter::new(&mut temp_file)
            .include_header(true)
            .finish(&mut frame)?;
        temp_file
            .flush()
            .map_err(|e| ReportError::OutputIo(dir.to_path_buf(), e))?;
        temp_file
            .persist(path)
            .map_err(|e| ReportError::Persist(path.to_path_buf(), e.error))?;
        info!(
            "Wrote {} rows x {} columns to {:?}",
            self.num_rows(),
            self.columns.len(),
            path
        );
        Ok(())
    }
}
