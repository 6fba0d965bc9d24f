//! EEG Band Power - sliding-window spectral feature extraction
//! 
//! Turns a multi-channel sample series into per-window delta, theta, alpha,
//! beta and gamma band powers in dB.

pub mod spectrum;
pub mod pipeline;
pub mod io;

pub use pipeline::{BandPowerPipeline, BandPowerRecord, PipelineConfig, Sample, Series};
pub use spectrum::{Band, BandTable, FftEngine, FrequencyBand};
pub use io::ParseMode;
