//! Import comparable sales from CSV exports of transaction registers.
//!
//! The expected columns are `Sale Date`, `Price`, `Area`, and optionally
//! `Index`, `Location Factor`, and `Condition Factor`; blank optional cells
//! are treated as absent.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::ComparableSale;

#[derive(Debug, thiserror::Error)]
pub enum ComparableImportError {
    #[error("failed to open comparable sales file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read comparable sales: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {message}")]
    Row { row: usize, message: String },
}

/// Read comparable sales from any reader producing the expected CSV shape.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ComparableSale>, ComparableImportError> {
    parser::parse_sales(reader)
}

/// Read comparable sales from a CSV file on disk.
pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<ComparableSale>, ComparableImportError> {
    let file = File::open(path)?;
    from_reader(file)
}
