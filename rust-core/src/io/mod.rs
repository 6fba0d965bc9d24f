//! CSV boundary: sample series in, band power table out

pub mod reader;
pub mod writer;

pub use reader::{read_series, read_series_from_path, ParseMode, ReadError};
pub use writer::{format_db, header, write_records, write_records_to_path, WriteError};
