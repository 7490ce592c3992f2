//! CSV roster reader.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::RawRow;
use crate::error::GradebookError;

/// Decodes CSV data with a header row into [`RawRow`]s.
///
/// Short rows are accepted; their missing trailing cells become absent
/// values. Cells beyond the header width are ignored.
///
/// # Errors
///
/// Returns an error if the data is not valid CSV.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            row.push(header, record.get(idx).map(str::to_string));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Reads a roster CSV from disk.
///
/// # Errors
///
/// A missing file yields [`GradebookError::SourceNotFound`]; an empty file
/// yields zero rows rather than an error.
pub fn read_roster(path: &Path) -> Result<Vec<RawRow>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(GradebookError::SourceNotFound(path.to_path_buf()).into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to open {}", path.display()));
        }
    };

    let rows = parse_roster(file).with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "Roster loaded");
    Ok(rows)
}
