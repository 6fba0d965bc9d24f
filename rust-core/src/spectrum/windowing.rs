//! Hamming windowing for spectral analysis
//!
//! Tapers each channel's window before the FFT to reduce spectral leakage

use std::f64::consts::PI;

/// Generate Hamming window coefficients
///
/// w[n] = 0.54 - 0.46*cos(2πn/(N-1)) for n = 0..N-1
///
/// # Arguments
/// * `length` - Number of samples (N), must be at least 2
///
/// # Returns
/// Vector of window coefficients
pub fn hamming_window(length: usize) -> Vec<f64> {
    debug_assert!(length >= 2, "Hamming window needs at least 2 samples");
    let denom = (length - 1) as f64;

    (0..length)
        .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / denom).cos())
        .collect()
}

/// Apply Hamming window to signal
///
/// # Arguments
/// * `signal` - Input signal (length N ≥ 2)
///
/// # Returns
/// Windowed signal of the same length
pub fn apply_hamming(signal: &[f64]) -> Vec<f64> {
    let window = hamming_window(signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Apply precomputed window coefficients in-place
///
/// The pipeline computes the coefficients once per configuration and reuses
/// them for every window and channel.
pub fn apply_window_inplace(signal: &mut [f64], window: &[f64]) {
    debug_assert_eq!(signal.len(), window.len());

    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}
