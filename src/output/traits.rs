//! Output error types and the table export trait
//!
//! This module defines the error type shared by every artifact writer and
//! the trait that maps a record type onto one CSV table.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed row in {source_name} at line {line}: {message}")]
    Format {
        source_name: String,
        line: u64,
        message: String,
    },

    #[error("{failed} of {attempted} artifacts could not be written")]
    ArtifactsFailed { failed: usize, attempted: usize },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A record type that is exported as one row of a CSV table
///
/// Implementations must be lossless: `from_row(to_row(r)) == r`.
pub trait TableExport: Sized {
    /// Header row written before any record
    const HEADERS: &'static [&'static str];

    /// Converts the record into its CSV fields, in header order
    fn to_row(&self) -> Vec<String>;

    /// Parses a record back from its CSV fields
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - The parsed record
    /// * `Err(String)` - Description of what is wrong with the row
    fn from_row(row: &csv::StringRecord) -> Result<Self, String>;
}
