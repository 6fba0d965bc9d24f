//! EEG frequency bands and band power aggregation
//!
//! Maps a band's edges in Hz onto FFT bins and sums squared magnitudes
//! over the half-open bin range `[low_bin, high_bin)`.

use num_complex::Complex;
use std::fmt;

/// Number of named bands
pub const BAND_COUNT: usize = 5;

/// Named EEG frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

impl Band {
    /// All bands in output order
    pub const ALL: [Band; BAND_COUNT] = [Band::Delta, Band::Theta, Band::Alpha, Band::Beta, Band::Gamma];

    /// Position of the band in [`Band::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used in column headers
    pub fn name(self) -> &'static str {
        match self {
            Band::Delta => "delta",
            Band::Theta => "theta",
            Band::Alpha => "alpha",
            Band::Beta => "beta",
            Band::Gamma => "gamma",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Frequency interval in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    pub low_hz: f64,
    pub high_hz: f64,
}

impl FrequencyBand {
    pub const fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }

    /// Map band edges onto FFT bin indices
    ///
    /// Both edges are truncated toward zero, never rounded:
    /// `bin = floor(freq * window_size / sample_rate)`.
    ///
    /// # Returns
    /// `(low_bin, high_bin)`; the band covers `low_bin..high_bin`
    pub fn bins(&self, window_size: usize, sample_rate: f64) -> (usize, usize) {
        let n = window_size as f64;
        let low_bin = (self.low_hz * n / sample_rate) as usize;
        let high_bin = (self.high_hz * n / sample_rate) as usize;
        (low_bin, high_bin)
    }
}

/// Edges for each named band, indexed by [`Band`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable {
    edges: [FrequencyBand; BAND_COUNT],
}

impl BandTable {
    /// Reference EEG band edges
    pub const STANDARD: BandTable = BandTable {
        edges: [
            FrequencyBand::new(0.5, 4.0),
            FrequencyBand::new(4.0, 8.0),
            FrequencyBand::new(8.0, 13.0),
            FrequencyBand::new(13.0, 30.0),
            FrequencyBand::new(30.0, 100.0),
        ],
    };

    pub fn new(edges: [FrequencyBand; BAND_COUNT]) -> Self {
        Self { edges }
    }

    /// Edges of a single band
    pub fn get(&self, band: Band) -> FrequencyBand {
        self.edges[band.index()]
    }

    /// Replace the edges of a single band
    pub fn with(mut self, band: Band, edges: FrequencyBand) -> Self {
        self.edges[band.index()] = edges;
        self
    }

    /// Iterate bands with their edges in output order
    pub fn iter(&self) -> impl Iterator<Item = (Band, FrequencyBand)> + '_ {
        Band::ALL.iter().map(move |&band| (band, self.get(band)))
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Sum spectral power over a band
///
/// # Arguments
/// * `spectrum` - Raw FFT output (unnormalized)
/// * `band` - Band edges in Hz
/// * `window_size` - Samples per window (N)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// `Σ |X[i]|² / N` over `i in [low_bin, high_bin)`, stopping at the end of
/// the spectrum. Empty or inverted ranges give 0.
pub fn band_power(
    spectrum: &[Complex<f64>],
    band: FrequencyBand,
    window_size: usize,
    sample_rate: f64,
) -> f64 {
    let (low_bin, high_bin) = band.bins(window_size, sample_rate);
    let end = high_bin.min(spectrum.len());

    let power: f64 = spectrum
        .get(low_bin..end)
        .unwrap_or(&[])
        .iter()
        .map(|c| {
            let mag = c.norm();
            mag * mag
        })
        .sum();

    power / window_size as f64
}
