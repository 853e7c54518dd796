//! Bar geometry for the spectrum
//!
//! Every quantity here is a pure function of the surface size, the bin count
//! and the bin index, so two frames with the same magnitudes always produce
//! the same picture.

use crate::color::Fill;
use crate::config::{BAR_GAP, BAR_HEIGHT_SCALE, BAR_WIDTH_SCALE};

/// Axis-aligned rectangle in logical surface pixels
///
/// `y` may be negative: bars taller than the surface extend above the top
/// edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Horizontal layout of `bin_count` bars on a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    bin_count: usize,
    surface_width: f64,
    surface_height: f64,
    bar_width: f64,
}

impl BarLayout {
    /// Layout for a surface of the given logical size
    ///
    /// `bin_count` must be non-zero.
    pub fn new(bin_count: usize, surface_width: u32, surface_height: u32) -> Self {
        debug_assert!(bin_count > 0, "bar layout needs at least one bin");
        let surface_width = f64::from(surface_width);
        Self {
            bin_count,
            surface_width,
            surface_height: f64::from(surface_height),
            bar_width: (surface_width / bin_count as f64) * BAR_WIDTH_SCALE,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Width of every bar
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Left edge of bar `index`
    pub fn bar_x(&self, index: usize) -> f64 {
        index as f64 * (self.bar_width + BAR_GAP)
    }

    /// Height of a bar for a magnitude (not clamped to the surface)
    pub fn bar_height(magnitude: u8) -> f64 {
        f64::from(magnitude) * BAR_HEIGHT_SCALE
    }

    /// Hue in degrees for bar `index`
    pub fn hue(&self, index: usize) -> f64 {
        (index as f64 / self.bin_count as f64) * 360.0
    }

    /// Rectangle for bar `index`, anchored to the bottom edge
    pub fn bar_rect(&self, index: usize, magnitude: u8) -> Rect {
        let height = Self::bar_height(magnitude);
        Rect::new(
            self.bar_x(index),
            self.surface_height - height,
            self.bar_width,
            height,
        )
    }

    /// Fill for bar `index`
    pub fn bar_fill(&self, index: usize) -> Fill {
        Fill::spectrum_hue(self.hue(index))
    }

    /// Rectangle covering the whole surface
    pub fn surface_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.surface_width, self.surface_height)
    }
}
