//! Fill colours for the drawing surface

use serde::{Deserialize, Serialize};

/// A solid fill, either RGB or HSL
///
/// HSL fills keep their original components so surfaces that understand CSS
/// colour strings can pass them through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    /// 8-bit RGB
    Rgb(u8, u8, u8),

    /// Hue in degrees, saturation and lightness in 0.0 - 1.0
    Hsl {
        hue: f64,
        saturation: f64,
        lightness: f64,
    },
}

impl Fill {
    /// Opaque black, used to clear the surface every frame
    pub const BLACK: Fill = Fill::Rgb(0, 0, 0);

    /// Fully saturated, mid-lightness colour for a hue in degrees
    pub fn spectrum_hue(hue: f64) -> Self {
        Fill::Hsl {
            hue,
            saturation: 1.0,
            lightness: 0.5,
        }
    }

    /// Resolve to 8-bit RGB
    pub fn to_rgb(self) -> [u8; 3] {
        match self {
            Fill::Rgb(r, g, b) => [r, g, b],
            Fill::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue, saturation, lightness),
        }
    }

    /// CSS colour string (`rgb(0, 0, 0)` / `hsl(90, 100%, 50%)`)
    pub fn to_css(self) -> String {
        match self {
            Fill::Rgb(r, g, b) => format!("rgb({}, {}, {})", r, g, b),
            Fill::Hsl {
                hue,
                saturation,
                lightness,
            } => format!(
                "hsl({}, {}%, {}%)",
                hue,
                saturation * 100.0,
                lightness * 100.0
            ),
        }
    }
}

/// Convert HSL (hue in degrees) to 8-bit RGB
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let hue = hue.rem_euclid(360.0) / 60.0;
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (hue % 2.0 - 1.0).abs());
    let m = lightness - chroma / 2.0;

    let (r, g, b) = match hue as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}
