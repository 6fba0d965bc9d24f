//! Sliding-window band power pipeline
//!
//! For every window and channel: Hamming window → FFT → band power ×5 → dB.
//! Windows are independent, so the same per-window unit of work backs the
//! sequential, parallel and cancellable entry points.

use super::config::{ConfigError, PipelineConfig};
use super::record::{BandPowerRecord, ChannelBandPowers};
use super::series::Series;
use crate::spectrum::windowing::{apply_window_inplace, hamming_window};
use crate::spectrum::{band_power, power_to_db, Band, FftEngine, BAND_COUNT};
use ndarray::ArrayView2;
use num_complex::Complex;
use rayon::prelude::*;
use std::iter::StepBy;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

/// Band power pipeline over a validated configuration
#[derive(Debug, Clone)]
pub struct BandPowerPipeline {
    config: PipelineConfig,

    /// Hamming coefficients for `config.window_size`
    coefficients: Vec<f64>,

    /// FFT plan template; each analyzer gets its own clone
    engine: FftEngine,
}

impl BandPowerPipeline {
    /// Create a pipeline, rejecting configurations it cannot run
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let coefficients = hamming_window(config.window_size);
        let engine = FftEngine::new(config.window_size);

        Ok(Self {
            config,
            coefficients,
            engine,
        })
    }

    /// Get current configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Start indices of every window processed for a series of `len` samples
    ///
    /// Starts run over `0..len - window_size` with step `overlap`. The start
    /// `len - window_size` itself is excluded, so a series of exactly
    /// `window_size` samples produces no window.
    pub fn window_starts(&self, len: usize) -> StepBy<Range<usize>> {
        (0..len.saturating_sub(self.config.window_size)).step_by(self.config.overlap)
    }

    /// Number of records `process` returns for a series of `len` samples
    pub fn window_count(&self, len: usize) -> usize {
        self.window_starts(len).len()
    }

    /// Per-window worker with its own FFT buffers
    pub fn analyzer(&self) -> WindowAnalyzer<'_> {
        WindowAnalyzer {
            config: &self.config,
            coefficients: &self.coefficients,
            engine: self.engine.clone(),
            signal: Vec::with_capacity(self.config.window_size),
            spectrum: Vec::with_capacity(self.engine.fft_size()),
        }
    }

    /// Run the full pass sequentially
    ///
    /// # Returns
    /// One record per window, in window order. Empty when the series is not
    /// longer than one window.
    pub fn process(&self, series: &Series) -> Vec<BandPowerRecord> {
        tracing::debug!(
            samples = series.len(),
            channels = series.channel_count(),
            windows = self.window_count(series.len()),
            "processing series"
        );

        let mut analyzer = self.analyzer();
        self.window_starts(series.len())
            .map(|start| analyzer.analyze_window(series, start))
            .collect()
    }

    /// Run the full pass with windows spread across the rayon thread pool
    ///
    /// Output order and values are identical to [`process`](Self::process).
    pub fn process_parallel(&self, series: &Series) -> Vec<BandPowerRecord> {
        let starts: Vec<usize> = self.window_starts(series.len()).collect();
        tracing::debug!(
            samples = series.len(),
            channels = series.channel_count(),
            windows = starts.len(),
            "processing series in parallel"
        );

        starts
            .par_iter()
            .map_init(
                || self.analyzer(),
                |analyzer, &start| analyzer.analyze_window(series, start),
            )
            .collect()
    }

    /// Run sequentially until `stop` is raised
    ///
    /// The flag is checked before each window.
    ///
    /// # Returns
    /// Records for the windows completed before the stop was observed
    pub fn process_until(&self, series: &Series, stop: &AtomicBool) -> Vec<BandPowerRecord> {
        let mut analyzer = self.analyzer();
        let mut records = Vec::with_capacity(self.window_count(series.len()));

        for start in self.window_starts(series.len()) {
            if stop.load(Ordering::Relaxed) {
                tracing::debug!(completed = records.len(), "processing stopped");
                break;
            }
            records.push(analyzer.analyze_window(series, start));
        }

        records
    }
}

/// Computes band powers for single windows
///
/// Holds reusable signal and spectrum buffers so the hot loop does not
/// allocate per channel.
pub struct WindowAnalyzer<'a> {
    config: &'a PipelineConfig,
    coefficients: &'a [f64],
    engine: FftEngine,
    signal: Vec<f64>,
    spectrum: Vec<Complex<f64>>,
}

impl WindowAnalyzer<'_> {
    /// Band powers of every channel for the window starting at `start`
    pub fn analyze_window(&mut self, series: &Series, start: usize) -> BandPowerRecord {
        let window = series.window(start, self.config.window_size);
        let mut record = BandPowerRecord::new(series.timestamp(start), series.channel_count());

        for channel in 0..series.channel_count() {
            let powers = self.channel_band_powers(window, channel);
            record.set_channel(channel, &powers);
        }

        record
    }

    /// dB band powers of one channel of one window
    ///
    /// # Arguments
    /// * `window` - Window of shape (window_size, channels)
    /// * `channel` - Channel column to analyze
    pub fn channel_band_powers(&mut self, window: ArrayView2<'_, f64>, channel: usize) -> ChannelBandPowers {
        self.signal.clear();
        self.signal.extend(window.column(channel).iter().copied());
        apply_window_inplace(&mut self.signal, self.coefficients);

        self.engine.compute_full_spectrum(&self.signal, &mut self.spectrum);

        let mut powers = [f64::NEG_INFINITY; BAND_COUNT];
        for band in Band::ALL {
            let power = band_power(
                &self.spectrum,
                self.config.bands.get(band),
                self.config.window_size,
                self.config.sample_rate,
            );
            powers[band.index()] = power_to_db(power);
        }
        powers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{BandTable, FrequencyBand};
    use ndarray::Array2;
    use std::f64::consts::PI;

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            window_size: 16,
            overlap: 8,
            sample_rate: 16.0,
            bands: BandTable::new([
                FrequencyBand::new(0.0, 2.0),
                FrequencyBand::new(2.0, 4.0),
                FrequencyBand::new(4.0, 6.0),
                FrequencyBand::new(6.0, 8.0),
                FrequencyBand::new(8.0, 16.0),
            ]),
        }
    }

    /// Series with `len` samples at 1/sample_rate spacing, each channel a
    /// sinusoid at its own frequency
    fn sine_series(len: usize, sample_rate: f64, freqs: &[f64]) -> Series {
        let timestamps = (0..len).map(|n| n as f64 / sample_rate).collect();
        let samples = Array2::from_shape_fn((len, freqs.len()), |(n, ch)| {
            (2.0 * PI * freqs[ch] * n as f64 / sample_rate).sin()
        });
        Series::new(timestamps, samples).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PipelineConfig {
            overlap: 0,
            ..Default::default()
        };
        assert_eq!(BandPowerPipeline::new(config).unwrap_err(), ConfigError::ZeroStride);
    }

    #[test]
    fn test_short_series_is_empty() {
        let pipeline = BandPowerPipeline::new(small_config()).unwrap();
        let series = sine_series(10, 16.0, &[1.0]);
        assert!(pipeline.process(&series).is_empty());
        assert!(pipeline.process(&Series::empty(3)).is_empty());
    }

    #[test]
    fn test_exact_window_length_is_empty() {
        let pipeline = BandPowerPipeline::new(small_config()).unwrap();
        let series = sine_series(16, 16.0, &[1.0]);
        assert!(pipeline.process(&series).is_empty());
    }

    #[test]
    fn test_one_window_past_exact_length() {
        let pipeline = BandPowerPipeline::new(small_config()).unwrap();
        let series = sine_series(17, 16.0, &[1.0]);
        assert_eq!(pipeline.process(&series).len(), 1);
    }

    #[test]
    fn test_window_plus_stride_yields_one_record() {
        let pipeline = BandPowerPipeline::new(PipelineConfig::default()).unwrap();
        let series = sine_series(256 + 128, 256.0, &[10.0, 20.0]);

        let records = pipeline.process(&series);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, series.timestamp(0));
        assert_eq!(records[0].channel_count(), 2);
    }

    #[test]
    fn test_window_starts() {
        let pipeline = BandPowerPipeline::new(small_config()).unwrap();

        assert_eq!(pipeline.window_starts(40).collect::<Vec<_>>(), vec![0, 8, 16]);
        // 24 + 16 == 40 would fit exactly but is excluded
        assert_eq!(pipeline.window_count(40), 3);
        assert_eq!(pipeline.window_count(41), 4);
        assert_eq!(pipeline.window_count(16), 0);
        assert_eq!(pipeline.window_count(0), 0);
    }

    #[test]
    fn test_record_timestamps_follow_stride() {
        let pipeline = BandPowerPipeline::new(small_config()).unwrap();
        let series = sine_series(41, 16.0, &[3.0]);

        let timestamps: Vec<f64> = pipeline.process(&series).iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_alpha_sine_dominates() {
        let pipeline = BandPowerPipeline::new(PipelineConfig::default()).unwrap();
        let series = sine_series(512, 256.0, &[10.0]);

        let records = pipeline.process(&series);
        let alpha = records[0].get(Band::Alpha, 0);

        for band in [Band::Delta, Band::Theta, Band::Beta, Band::Gamma] {
            let other = records[0].get(band, 0);
            assert!(alpha > other + 20.0, "alpha {alpha} dB vs {band} {other} dB");
        }
    }

    #[test]
    fn test_silent_channel_is_negative_infinity() {
        let pipeline = BandPowerPipeline::new(small_config()).unwrap();
        let timestamps = (0..32).map(|n| n as f64).collect();
        let series = Series::new(timestamps, Array2::zeros((32, 2))).unwrap();

        let records = pipeline.process(&series);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.values().all(|v| v == f64::NEG_INFINITY));
        }
    }

    #[test]
    fn test_channel_band_powers_matches_manual_chain() {
        let config = small_config();
        let pipeline = BandPowerPipeline::new(config.clone()).unwrap();
        let series = sine_series(32, 16.0, &[1.0, 5.0]);
        let window = series.window(8, 16);

        let mut analyzer = pipeline.analyzer();
        let powers = analyzer.channel_band_powers(window, 1);

        let signal: Vec<f64> = window.column(1).to_vec();
        let windowed = crate::spectrum::apply_hamming(&signal);
        let mut engine = FftEngine::new(16);
        let mut spectrum = Vec::new();
        engine.compute_full_spectrum(&windowed, &mut spectrum);

        for band in Band::ALL {
            let expected = power_to_db(band_power(&spectrum, config.bands.get(band), 16, 16.0));
            assert_eq!(powers[band.index()], expected);
        }
    }

    #[test]
    fn test_idempotent() {
        let pipeline = BandPowerPipeline::new(PipelineConfig::default()).unwrap();
        let series = sine_series(1024, 256.0, &[2.0, 6.0, 10.0, 20.0, 40.0, 0.0]);

        let first = pipeline.process(&series);
        let second = pipeline.process(&series);
        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pipeline = BandPowerPipeline::new(PipelineConfig::default()).unwrap();
        let series = sine_series(2048, 256.0, &[2.0, 6.0, 10.0, 20.0, 40.0, 3.5]);

        let sequential = pipeline.process(&series);
        let parallel = pipeline.process_parallel(&series);

        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(a.timestamp, b.timestamp);
            // Bit-identical, including negative infinities
            let a_bits: Vec<u64> = a.values().map(f64::to_bits).collect();
            let b_bits: Vec<u64> = b.values().map(f64::to_bits).collect();
            assert_eq!(a_bits, b_bits);
        }
    }

    #[test]
    fn test_process_until_stops_early() {
        let pipeline = BandPowerPipeline::new(small_config()).unwrap();
        let series = sine_series(100, 16.0, &[1.0]);

        let stop = AtomicBool::new(true);
        assert!(pipeline.process_until(&series, &stop).is_empty());

        let run = AtomicBool::new(false);
        assert_eq!(pipeline.process_until(&series, &run), pipeline.process(&series));
    }
}
