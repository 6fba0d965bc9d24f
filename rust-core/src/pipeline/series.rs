//! Multi-channel sample series

use ndarray::{s, Array2, ArrayView1, ArrayView2};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Sample {index} has {found} channels, expected {expected}")]
    ChannelMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("{timestamps} timestamps for {rows} sample rows")]
    LengthMismatch { timestamps: usize, rows: usize },
}

/// One timestamped reading across all channels
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Time in seconds
    pub timestamp: f64,

    /// Amplitude per channel
    pub channels: Vec<f64>,
}

impl Sample {
    pub fn new(timestamp: f64, channels: Vec<f64>) -> Self {
        Self { timestamp, channels }
    }
}

/// Ordered, immutable sample series
///
/// Samples are stored as a (samples × channels) matrix so that a window is
/// a row slice and a channel's window is a column of that slice. Timestamps
/// are assumed non-decreasing and are not re-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    timestamps: Vec<f64>,
    samples: Array2<f64>,
}

impl Series {
    /// Build a series from a timestamp vector and a sample matrix
    ///
    /// # Arguments
    /// * `timestamps` - One timestamp per row
    /// * `samples` - Matrix of shape (samples, channels)
    pub fn new(timestamps: Vec<f64>, samples: Array2<f64>) -> Result<Self, SeriesError> {
        if timestamps.len() != samples.nrows() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                rows: samples.nrows(),
            });
        }
        Ok(Self { timestamps, samples })
    }

    /// Build a series from individual samples
    ///
    /// The channel count is taken from the first sample; every other sample
    /// must match it.
    pub fn from_samples(samples: &[Sample]) -> Result<Self, SeriesError> {
        let channels = samples.first().map_or(0, |s| s.channels.len());
        Self::from_samples_with_channels(samples, channels)
    }

    /// Build a series with an explicit channel count (valid for empty input)
    pub fn from_samples_with_channels(samples: &[Sample], channels: usize) -> Result<Self, SeriesError> {
        let mut timestamps = Vec::with_capacity(samples.len());
        let mut matrix = Array2::<f64>::zeros((samples.len(), channels));

        for (index, (sample, mut row)) in samples.iter().zip(matrix.rows_mut()).enumerate() {
            if sample.channels.len() != channels {
                return Err(SeriesError::ChannelMismatch {
                    index,
                    expected: channels,
                    found: sample.channels.len(),
                });
            }
            timestamps.push(sample.timestamp);
            row.assign(&ArrayView1::from(sample.channels.as_slice()));
        }

        Ok(Self {
            timestamps,
            samples: matrix,
        })
    }

    /// An empty series with the given channel count
    pub fn empty(channels: usize) -> Self {
        Self {
            timestamps: Vec::new(),
            samples: Array2::zeros((0, channels)),
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of channels per sample
    pub fn channel_count(&self) -> usize {
        self.samples.ncols()
    }

    /// Timestamp of sample `index`
    pub fn timestamp(&self, index: usize) -> f64 {
        self.timestamps[index]
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Full sample matrix (samples × channels)
    pub fn samples(&self) -> ArrayView2<'_, f64> {
        self.samples.view()
    }

    /// Window of `len` consecutive samples starting at `start`
    pub fn window(&self, start: usize, len: usize) -> ArrayView2<'_, f64> {
        self.samples.slice(s![start..start + len, ..])
    }

    /// All readings of a single channel
    pub fn channel(&self, channel: usize) -> ArrayView1<'_, f64> {
        self.samples.column(channel)
    }
}
