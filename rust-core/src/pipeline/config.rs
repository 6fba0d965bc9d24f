//! Band power pipeline configuration

use crate::spectrum::BandTable;
use thiserror::Error;

/// Samples per window in the reference setup (1 s at 256 Hz)
pub const DEFAULT_WINDOW_SIZE: usize = 256;

/// Stride between window starts in the reference setup (50% overlap)
pub const DEFAULT_OVERLAP: usize = 128;

/// Sample rate in Hz in the reference setup
pub const DEFAULT_SAMPLE_RATE: f64 = 256.0;

/// Channel count of the reference recordings
pub const DEFAULT_CHANNELS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Window size must be at least 2 samples (got {0})")]
    WindowTooSmall(usize),

    #[error("Overlap (window stride) must be at least 1 sample")]
    ZeroStride,

    #[error("Sample rate must be a positive finite number (got {0})")]
    InvalidSampleRate(f64),
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Samples per window (also the FFT size)
    pub window_size: usize,

    /// Samples advanced between consecutive window starts
    ///
    /// Despite the name this is the stride: 128 with a 256-sample window
    /// gives a 50% overlapping slide.
    pub overlap: usize,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Band edges in Hz
    pub bands: BandTable,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            overlap: DEFAULT_OVERLAP,
            sample_rate: DEFAULT_SAMPLE_RATE,
            bands: BandTable::STANDARD,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration before any window is processed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size < 2 {
            return Err(ConfigError::WindowTooSmall(self.window_size));
        }
        if self.overlap == 0 {
            return Err(ConfigError::ZeroStride);
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }

    /// Frequency resolution of one FFT bin in Hz
    pub fn bin_width_hz(&self) -> f64 {
        self.sample_rate / self.window_size as f64
    }
}
