//! Frequency snapshot buffer
//!
//! One buffer is allocated per graph construction and refilled in place by
//! the analyser every frame.

use crate::config::validate_fft_size;
use crate::error::Result;

/// Fixed-length byte magnitudes for one frame (index = frequency bin)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencySnapshot {
    bins: Box<[u8]>,
}

impl FrequencySnapshot {
    /// Allocate a zeroed snapshot for an analyser window of `fft_size` samples
    ///
    /// The snapshot holds `fft_size / 2` bins.
    pub fn for_window(fft_size: usize) -> Result<Self> {
        validate_fft_size(fft_size)?;
        Ok(Self {
            bins: vec![0; fft_size / 2].into_boxed_slice(),
        })
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Always false for a validated window; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Read-only view for drawing
    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    /// Writable view for the analyser
    pub fn bins_mut(&mut self) -> &mut [u8] {
        &mut self.bins
    }

    /// Magnitude at `index`, if in range
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bins.get(index).copied()
    }

    /// Zero every bin
    pub fn clear(&mut self) {
        self.bins.fill(0);
    }
}
