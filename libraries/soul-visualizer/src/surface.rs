//! Drawing surfaces
//!
//! A surface only needs to fill axis-aligned rectangles. Rectangles may lie
//! partly or fully outside the surface; implementations clip silently.

use crate::color::Fill;
use crate::layout::Rect;

/// 2D drawing target with a fixed logical size
pub trait DrawingSurface {
    /// Logical width in pixels
    fn width(&self) -> u32;

    /// Logical height in pixels
    fn height(&self) -> u32;

    /// Fill a rectangle, clipping anything outside the surface
    fn fill_rect(&mut self, rect: Rect, fill: Fill);

    /// Fill the whole surface
    fn clear(&mut self, fill: Fill) {
        let rect = Rect::new(0.0, 0.0, f64::from(self.width()), f64::from(self.height()));
        self.fill_rect(rect, fill);
    }
}

/// In-memory RGBA8 raster
///
/// Pixel (x, y) is covered by a rectangle when its centre lies inside it,
/// which matches how canvas rasterizes axis-aligned fills without
/// anti-aliasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the surface, returning its RGBA bytes
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA value at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(rgba)
    }

    /// Pixel index range [start, end) covered along one axis
    fn span(start: f64, length: f64, limit: u32) -> (u32, u32) {
        if !(start.is_finite() && length.is_finite()) || length <= 0.0 {
            return (0, 0);
        }
        let first = (start - 0.5).ceil().max(0.0);
        let last = (start + length - 0.5).ceil().min(f64::from(limit));
        if last <= first {
            (0, 0)
        } else {
            (first as u32, last as u32)
        }
    }
}

impl DrawingSurface for PixelSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, fill: Fill) {
        let (x0, x1) = Self::span(rect.x, rect.width, self.width);
        let (y0, y1) = Self::span(rect.y, rect.height, self.height);
        if x0 == x1 || y0 == y1 {
            return;
        }

        let [r, g, b] = fill.to_rgb();
        let stride = self.width as usize * 4;
        for y in y0..y1 {
            let row = y as usize * stride;
            for x in x0..x1 {
                let offset = row + x as usize * 4;
                self.pixels[offset..offset + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
    }
}
