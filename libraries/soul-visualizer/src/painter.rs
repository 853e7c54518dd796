//! Draws one spectrum frame

use crate::color::Fill;
use crate::layout::BarLayout;
use crate::snapshot::FrequencySnapshot;
use crate::surface::DrawingSurface;

/// Clear the surface to black and draw one bar per bin, left to right
pub fn paint_spectrum<S>(snapshot: &FrequencySnapshot, layout: &BarLayout, surface: &mut S)
where
    S: DrawingSurface + ?Sized,
{
    surface.fill_rect(layout.surface_rect(), Fill::BLACK);

    for (index, &magnitude) in snapshot.bins().iter().enumerate() {
        surface.fill_rect(layout.bar_rect(index, magnitude), layout.bar_fill(index));
    }
}
