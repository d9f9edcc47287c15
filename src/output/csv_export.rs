//! CSV table export and import
//!
//! Each record type maps onto one table with a fixed header. Fields are
//! quoted as needed, so URLs containing commas or quotes read back intact.

use crate::output::traits::{OutputError, OutputResult, TableExport};
use crate::stats::{UrlDetailRecord, UrlInfoRecord, UrlStatusRecord};
use crate::url::ScopeIndicator;
use std::io::{Read, Write};
use std::path::Path;

impl TableExport for UrlStatusRecord {
    const HEADERS: &'static [&'static str] = &["Fetched URL", "Status Code"];

    fn to_row(&self) -> Vec<String> {
        vec![self.url.clone(), self.status_code.to_string()]
    }

    fn from_row(row: &csv::StringRecord) -> Result<Self, String> {
        Ok(Self {
            url: field(row, 0)?.to_string(),
            status_code: parse_number(row, 1)?,
        })
    }
}

impl TableExport for UrlInfoRecord {
    const HEADERS: &'static [&'static str] = &[
        "Downloaded URL",
        "Size in Bytes",
        "No of outlinks",
        "ContentType",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.url.clone(),
            self.size_bytes.to_string(),
            self.outlink_count.to_string(),
            self.content_type.clone(),
        ]
    }

    fn from_row(row: &csv::StringRecord) -> Result<Self, String> {
        Ok(Self {
            url: field(row, 0)?.to_string(),
            size_bytes: parse_number(row, 1)?,
            outlink_count: parse_number(row, 2)?,
            content_type: field(row, 3)?.to_string(),
        })
    }
}

impl TableExport for UrlDetailRecord {
    const HEADERS: &'static [&'static str] = &["URL", "Residence Indicator"];

    fn to_row(&self) -> Vec<String> {
        vec![self.url.clone(), self.scope.as_str().to_string()]
    }

    fn from_row(row: &csv::StringRecord) -> Result<Self, String> {
        let indicator = field(row, 1)?;
        let scope = ScopeIndicator::from_indicator(indicator)
            .ok_or_else(|| format!("unknown residence indicator '{}'", indicator))?;

        Ok(Self {
            url: field(row, 0)?.to_string(),
            scope,
        })
    }
}

fn field(row: &csv::StringRecord, idx: usize) -> Result<&str, String> {
    row.get(idx)
        .ok_or_else(|| format!("missing column {}", idx + 1))
}

fn parse_number<N: std::str::FromStr>(row: &csv::StringRecord, idx: usize) -> Result<N, String> {
    let raw = field(row, idx)?;
    raw.parse()
        .map_err(|_| format!("column {} is not a valid number: '{}'", idx + 1, raw))
}

/// Writes a table to any writer: header first, then one row per record
///
/// # Returns
///
/// The number of records written
pub fn write_rows<W: Write, T: TableExport>(writer: W, rows: &[T]) -> OutputResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(T::HEADERS)?;
    for row in rows {
        csv_writer.write_record(row.to_row())?;
    }
    csv_writer.flush()?;
    Ok(rows.len())
}

/// Writes a table to a file, replacing any existing file
///
/// The file is opened, fully written, flushed and closed within this call.
pub fn write_table<T: TableExport>(path: &Path, rows: &[T]) -> OutputResult<usize> {
    let file = std::fs::File::create(path)?;
    write_rows(file, rows)
}

/// Reads a table from any reader, checking the header
///
/// # Arguments
///
/// * `reader` - The CSV source
/// * `source_name` - Name used in error messages (usually the file path)
pub fn read_rows<R: Read, T: TableExport>(reader: R, source_name: &str) -> OutputResult<Vec<T>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if !headers.iter().eq(T::HEADERS.iter().copied()) {
        return Err(OutputError::Format {
            source_name: source_name.to_string(),
            line: 1,
            message: format!(
                "expected header '{}', found '{}'",
                T::HEADERS.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let record = T::from_row(&row).map_err(|message| OutputError::Format {
            source_name: source_name.to_string(),
            line: row.position().map(|p| p.line()).unwrap_or(0),
            message,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Reads a table from a file written by [`write_table`]
pub fn read_table<T: TableExport>(path: &Path) -> OutputResult<Vec<T>> {
    let file = std::fs::File::open(path)?;
    read_rows(file, &path.display().to_string())
}
