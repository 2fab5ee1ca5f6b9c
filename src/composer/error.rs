use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Failed to build report frame")]
    Frame(#[from] PolarsError),

    #[error("I/O error writing report into '{0}'")]
    OutputIo(PathBuf, #[source] std::io::Error),

    #[error("Failed to move finished report to '{0}'")]
    Persist(PathBuf, #[source] std::io::Error),
}
