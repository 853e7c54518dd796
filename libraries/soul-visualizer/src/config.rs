//! Analyser and layout configuration
//!
//! The visualizer itself always runs with the fixed defaults defined here so
//! the bar layout stays deterministic. Other window sizes are accepted by the
//! analyser and snapshot APIs.

use crate::error::{Result, VisualizerError};
use serde::{Deserialize, Serialize};

/// Logical drawing surface width in pixels
pub const SURFACE_WIDTH: u32 = 800;

/// Logical drawing surface height in pixels
pub const SURFACE_HEIGHT: u32 = 200;

/// Analyser window used by the visualizer (128 bins)
pub const DEFAULT_FFT_SIZE: usize = 256;

/// Smallest window the analyser accepts
pub const MIN_FFT_SIZE: usize = 32;

/// Largest window the analyser accepts
pub const MAX_FFT_SIZE: usize = 32768;

/// Multiplier applied to the even bar share of the surface width
pub const BAR_WIDTH_SCALE: f64 = 2.5;

/// Horizontal gap after every bar
pub const BAR_GAP: f64 = 1.0;

/// Bar height per magnitude unit
pub const BAR_HEIGHT_SCALE: f64 = 2.0;

/// Analyser configuration
///
/// Defaults mirror the Web Audio `AnalyserNode` defaults, with the window
/// reduced to 256 samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyserConfig {
    /// Window size in samples (power of two, 32..=32768)
    pub fft_size: usize,

    /// Temporal smoothing between frames (0.0 - 1.0, default: 0.8)
    pub smoothing_time_constant: f64,

    /// Magnitude mapped to byte 0 (default: -100 dB)
    pub min_decibels: f64,

    /// Magnitude mapped to byte 255 (default: -30 dB)
    pub max_decibels: f64,
}

impl AnalyserConfig {
    /// Create a config with the given window and default smoothing/range
    pub fn with_fft_size(fft_size: usize) -> Result<Self> {
        let config = Self {
            fft_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Number of magnitude bins produced per frame
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_fft_size(self.fft_size)?;

        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(VisualizerError::InvalidConfig(format!(
                "smoothing_time_constant {} outside 0.0..=1.0",
                self.smoothing_time_constant
            )));
        }

        let range_ok = self.min_decibels.is_finite()
            && self.max_decibels.is_finite()
            && self.min_decibels < self.max_decibels;
        if !range_ok {
            return Err(VisualizerError::InvalidConfig(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }

        Ok(())
    }
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

/// Check that a window size is a power of two within the supported range
pub fn validate_fft_size(fft_size: usize) -> Result<()> {
    if fft_size.is_power_of_two() && (MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&fft_size) {
        Ok(())
    } else {
        Err(VisualizerError::InvalidWindowSize(fft_size))
    }
}
