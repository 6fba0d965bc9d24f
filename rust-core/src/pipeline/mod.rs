//! Windowing pipeline from raw samples to per-window band powers

pub mod config;
pub mod series;
pub mod record;
pub mod processor;

pub use config::{ConfigError, PipelineConfig};
pub use series::{Sample, Series, SeriesError};
pub use record::{BandPowerRecord, ChannelBandPowers};
pub use processor::{BandPowerPipeline, WindowAnalyzer};
