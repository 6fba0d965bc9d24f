//! CSV output: one row per window, band-major columns

use crate::pipeline::BandPowerRecord;
use crate::spectrum::Band;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Token written for a negative-infinity dB value (silent band)
pub const NEG_INFINITY_TOKEN: &str = "-Inf";

/// Token written for a positive-infinity value
pub const POS_INFINITY_TOKEN: &str = "+Inf";

/// Token written for NaN
pub const NAN_TOKEN: &str = "NaN";

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush output: {0}")]
    Flush(#[from] std::io::Error),

    #[error("Record {index} has {found} channels, expected {expected}")]
    ChannelMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Column names: `timestamps`, then `<band>_<n>` for each band and
/// 1-based channel
pub fn header(channels: usize) -> Vec<String> {
    let mut columns = Vec::with_capacity(1 + Band::ALL.len() * channels);
    columns.push("timestamps".to_string());
    for band in Band::ALL {
        for channel in 1..=channels {
            columns.push(format!("{band}_{channel}"));
        }
    }
    columns
}

fn non_finite_token(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN_TOKEN)
    } else if value == f64::NEG_INFINITY {
        Some(NEG_INFINITY_TOKEN)
    } else if value == f64::INFINITY {
        Some(POS_INFINITY_TOKEN)
    } else {
        None
    }
}

/// Format a dB value with exactly two decimals
pub fn format_db(value: f64) -> String {
    match non_finite_token(value) {
        Some(token) => token.to_string(),
        None => format!("{value:.2}"),
    }
}

/// Format a timestamp with the shortest representation that round-trips
pub fn format_timestamp(value: f64) -> String {
    match non_finite_token(value) {
        Some(token) => token.to_string(),
        None => value.to_string(),
    }
}

/// Write records as CSV
///
/// # Arguments
/// * `writer` - Output sink
/// * `records` - Pipeline output in window order
/// * `channels` - Channel count for the header; every record must match it
pub fn write_records<W: Write>(
    writer: W,
    records: &[BandPowerRecord],
    channels: usize,
) -> Result<(), WriteError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(channels))?;

    let mut row: Vec<String> = Vec::with_capacity(1 + Band::ALL.len() * channels);
    for (index, record) in records.iter().enumerate() {
        if record.channel_count() != channels {
            return Err(WriteError::ChannelMismatch {
                index,
                expected: channels,
                found: record.channel_count(),
            });
        }

        row.clear();
        row.push(format_timestamp(record.timestamp));
        row.extend(record.values().map(format_db));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write records to a CSV file, replacing any existing file
pub fn write_records_to_path(
    path: impl AsRef<Path>,
    records: &[BandPowerRecord],
    channels: usize,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), records = records.len(), "writing band powers");
    write_records(file, records, channels)
}
