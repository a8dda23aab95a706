//! Loads a single numeric column from a delimited text file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::RunsTestError;
use crate::sample::Sample;

/// Reads `column` from the delimited file at `path` into a [`Sample`].
///
/// # Errors
///
/// Fails if the file cannot be opened, the column is absent from the header,
/// any cell is empty or not a finite number, or fewer than two rows remain.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_column(
    path: impl AsRef<Path>,
    column: &str,
    delimiter: u8,
) -> Result<Sample, RunsTestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RunsTestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_column(file, column, delimiter)
}

/// Same as [`load_column`] but over any reader, e.g. an in-memory buffer.
pub fn read_column<R: Read>(
    reader: R,
    column: &str,
    delimiter: u8,
) -> Result<Sample, RunsTestError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let idx = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| RunsTestError::MissingColumn {
            column: column.to_string(),
            available: headers.iter().collect::<Vec<_>>().join(", "),
        })?;
    debug!(column, index = idx, "Column located");

    let mut values = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i as u64 + 1;

        let raw = match record.get(idx) {
            Some(cell) if !cell.is_empty() => cell,
            _ => return Err(RunsTestError::MissingValue { row }),
        };

        let value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RunsTestError::NonNumeric {
                row,
                value: raw.to_string(),
            })?;
        values.push(value);
    }

    debug!(rows = values.len(), "Column loaded");
    Sample::new(values)
}
