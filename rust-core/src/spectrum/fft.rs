//! FFT engine using realfft for real-valued signals
//!
//! Produces raw (unnormalized) spectra for band power aggregation

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// FFT engine for real-valued signals
///
/// Cloning shares the FFT plan and gives the clone its own buffers, so each
/// worker thread can own an engine.
#[derive(Clone)]
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (realfft uses it as scratch)
    input_buffer: Vec<f64>,

    /// Reusable output buffer (one-sided complex spectrum)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute one-sided spectrum X[k] for k = 0..fft_size/2
    ///
    /// # Arguments
    /// * `signal` - Input signal (zero-padded if shorter than fft_size,
    ///   truncated if longer)
    ///
    /// # Returns
    /// Slice of fft_size/2 + 1 complex bins, no 1/N scaling applied
    pub fn compute_spectrum(&mut self, signal: &[f64]) -> &[Complex<f64>] {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        if copy_len < self.fft_size {
            self.input_buffer[copy_len..].fill(0.0);
        }

        // Buffers come from the plan itself, so lengths always match
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .expect("FFT buffers sized by planner");

        &self.output_buffer
    }

    /// Compute the full two-sided spectrum of length fft_size
    ///
    /// Bins above Nyquist are filled with the complex conjugates of their
    /// mirror bins, X[N-k] = conj(X[k]), which is what a complex FFT of the
    /// same real input yields.
    pub fn compute_full_spectrum(&mut self, signal: &[f64], spectrum: &mut Vec<Complex<f64>>) {
        let n = self.fft_size;
        let bins = self.num_bins();
        let half = self.compute_spectrum(signal);

        spectrum.clear();
        spectrum.reserve(n);
        spectrum.extend_from_slice(half);
        for k in bins..n {
            spectrum.push(half[n - k].conj());
        }
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of one-sided frequency bins (fft_size/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

impl std::fmt::Debug for FftEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftEngine")
            .field("fft_size", &self.fft_size)
            .finish_non_exhaustive()
    }
}
