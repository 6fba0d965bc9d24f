//! Spectral analysis: windowing, FFT and band power

pub mod windowing;
pub mod fft;
pub mod bands;
pub mod decibel;

pub use fft::FftEngine;
pub use windowing::{apply_hamming, hamming_window};
pub use bands::{band_power, Band, BandTable, FrequencyBand, BAND_COUNT};
pub use decibel::power_to_db;
