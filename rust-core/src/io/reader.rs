//! CSV input: `timestamp, ch1..chC` rows after a header row

use crate::pipeline::{Sample, Series, SeriesError};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: expected at least {expected} fields, found {found}")]
    ShortRecord { line: u64, expected: usize, found: usize },

    #[error("Line {line}, column {column}: invalid number {value:?}")]
    InvalidNumber { line: u64, column: usize, value: String },

    #[error("Inconsistent series: {0}")]
    Series(#[from] SeriesError),
}

/// How malformed numeric fields are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Substitute 0.0 and keep going
    #[default]
    Lenient,

    /// Fail with [`ReadError::InvalidNumber`]
    Strict,
}

/// Read a series from a CSV file
///
/// # Arguments
/// * `path` - CSV file with a header row
/// * `channels` - Number of channel columns after the timestamp
/// * `mode` - Handling of malformed numbers
pub fn read_series_from_path(
    path: impl AsRef<Path>,
    channels: usize,
    mode: ParseMode,
) -> Result<Series, ReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), channels, ?mode, "reading series");
    read_series(file, channels, mode)
}

/// Read a series from any CSV source
///
/// The first row is a header and is skipped. Columns past `1 + channels`
/// are ignored; every row must have the same number of fields.
pub fn read_series<R: Read>(reader: R, channels: usize, mode: ParseMode) -> Result<Series, ReadError> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut samples = Vec::new();
    let mut substituted = 0usize;

    // Fields that are not UTF-8 count as malformed numbers
    for result in rdr.byte_records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() < channels + 1 {
            return Err(ReadError::ShortRecord {
                line,
                expected: channels + 1,
                found: record.len(),
            });
        }

        let mut parse = |column: usize| -> Result<f64, ReadError> {
            let field = &record[column];
            let parsed = std::str::from_utf8(field)
                .ok()
                .and_then(|text| text.parse::<f64>().ok());

            match parsed {
                Some(value) => Ok(value),
                None if mode == ParseMode::Lenient => {
                    tracing::trace!(
                        line,
                        column,
                        value = %String::from_utf8_lossy(field),
                        "substituting 0 for malformed number"
                    );
                    substituted += 1;
                    Ok(0.0)
                }
                None => Err(ReadError::InvalidNumber {
                    line,
                    column,
                    value: String::from_utf8_lossy(field).into_owned(),
                }),
            }
        };

        let timestamp = parse(0)?;
        let values = (1..=channels).map(&mut parse).collect::<Result<Vec<_>, _>>()?;
        samples.push(Sample::new(timestamp, values));
    }

    if substituted > 0 {
        tracing::warn!(fields = substituted, "malformed numeric fields read as 0");
    }

    Ok(Series::from_samples_with_channels(&samples, channels)?)
}
