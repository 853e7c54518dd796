//! FFT analyser matching the Web Audio `AnalyserNode` byte output
//!
//! Per frame:
//! 1. Blackman window (alpha 0.16) over the newest `fft_size` samples
//! 2. Forward FFT, magnitude `|X[k]| / fft_size` for the lower half
//! 3. Smoothing `m = tau * m_prev + (1 - tau) * |X[k]|`
//! 4. `dB = 20 * log10(m)` mapped linearly from `min_decibels..max_decibels`
//!    onto `0..=255`
//!
//! The native and browser backends therefore draw the same bars for the same
//! audio.

use crate::config::AnalyserConfig;
use crate::error::Result;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;
use tracing::debug;

const BLACKMAN_ALPHA: f32 = 0.16;

/// Frequency analyser over a sliding window of mono samples
pub struct FftAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Smoothed linear magnitudes, one per bin
    smoothed: Vec<f64>,
}

impl FftAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self> {
        config.validate()?;

        let fft_size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch_len = fft.get_inplace_scratch_len();

        debug!(
            "FFT analyser created: fft_size={}, smoothing={}, range={}..{} dB",
            fft_size, config.smoothing_time_constant, config.min_decibels, config.max_decibels
        );

        Ok(Self {
            config,
            fft,
            window: blackman_window(fft_size),
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            smoothed: vec![0.0; fft_size / 2],
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.config.fft_size / 2
    }

    /// Analyse the newest window and write byte magnitudes into `out`
    ///
    /// `samples` holds the window, oldest first. A short slice is treated as
    /// preceded by silence; a long one contributes only its tail.
    pub fn analyse(&mut self, samples: &[f32], out: &mut [u8]) {
        let fft_size = self.config.fft_size;
        let tail = &samples[samples.len().saturating_sub(fft_size)..];
        let padding = fft_size - tail.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < padding { 0.0 } else { tail[i - padding] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        let tau = self.config.smoothing_time_constant;
        let scale = 1.0 / fft_size as f64;
        for (bin, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = f64::from(self.buffer[bin].norm()) * scale;
            let next = tau * *smoothed + (1.0 - tau) * magnitude;
            *smoothed = if next.is_finite() { next } else { 0.0 };
        }

        for (byte, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            *byte = self.to_byte(magnitude);
        }
    }

    /// Forget smoothing history
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
    }

    fn to_byte(&self, magnitude: f64) -> u8 {
        let min = self.config.min_decibels;
        let max = self.config.max_decibels;
        let db = 20.0 * magnitude.log10();
        let scaled = (255.0 / (max - min) * (db - min)).floor();
        // -inf (silence) and NaN both land on 0
        if scaled.is_nan() {
            0
        } else {
            scaled.clamp(0.0, 255.0) as u8
        }
    }
}

/// Blackman window of length `size`, periodic form
fn blackman_window(size: usize) -> Vec<f32> {
    let a0 = (1.0 - BLACKMAN_ALPHA) / 2.0;
    let a1 = 0.5;
    let a2 = BLACKMAN_ALPHA / 2.0;
    (0..size)
        .map(|n| {
            let phase = 2.0 * PI * n as f32 / size as f32;
            a0 - a1 * phase.cos() + a2 * (2.0 * phase).cos()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency_bin: usize, fft_size: usize, amplitude: f32) -> Vec<f32> {
        (0..fft_size)
            .map(|n| {
                amplitude * (2.0 * PI * frequency_bin as f32 * n as f32 / fft_size as f32).sin()
            })
            .collect()
    }

    #[test]
    fn silence_maps_to_zero() {
        let mut analyser = FftAnalyser::new(AnalyserConfig::default()).unwrap();
        let mut out = vec![9u8; 128];
        analyser.analyse(&[0.0; 256], &mut out);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn window_shape() {
        let window = blackman_window(256);
        assert!(window[0].abs() < 1e-6);
        assert!((window[128] - 1.0).abs() < 1e-5);
        assert!(window.iter().all(|&w| (-1e-6..=1.0 + 1e-6).contains(&w)));
    }

    #[test]
    fn tone_peaks_at_its_bin() {
        let config = AnalyserConfig {
            smoothing_time_constant: 0.0,
            ..Default::default()
        };
        let mut analyser = FftAnalyser::new(config).unwrap();
        let mut out = vec![0u8; 128];
        analyser.analyse(&sine(20, 256, 0.001), &mut out);

        let peak = out
            .iter()
            .enumerate()
            .max_by_key(|(_, &b)| b)
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 20);
        assert!(out[20] > out[19] && out[20] > out[21]);
        assert_eq!(out[100], 0);
    }

    #[test]
    fn smoothing_rises_gradually() {
        let mut analyser = FftAnalyser::new(AnalyserConfig::default()).unwrap();
        let signal = sine(10, 256, 0.01);
        let mut first = vec![0u8; 128];
        let mut later = vec![0u8; 128];

        analyser.analyse(&signal, &mut first);
        for _ in 0..20 {
            analyser.analyse(&signal, &mut later);
        }
        assert!(later[10] > first[10]);

        analyser.reset();
        let mut after_reset = vec![0u8; 128];
        analyser.analyse(&signal, &mut after_reset);
        assert_eq!(after_reset[10], first[10]);
    }

    #[test]
    fn short_input_is_padded_with_silence() {
        let mut analyser = FftAnalyser::new(AnalyserConfig::default()).unwrap();
        let mut out = vec![0u8; 128];
        analyser.analyse(&[], &mut out);
        assert!(out.iter().all(|&b| b == 0));
    }
}
