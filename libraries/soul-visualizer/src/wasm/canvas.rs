//! Canvas 2D drawing surface

use crate::color::Fill;
use crate::config::{SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::layout::Rect;
use crate::surface::DrawingSurface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draws onto an `HtmlCanvasElement` through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Take over `canvas`, forcing its bitmap to 800x200
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(SURFACE_WIDTH);
        canvas.set_height(SURFACE_HEIGHT);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawingSurface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    #[allow(deprecated)]
    fn fill_rect(&mut self, rect: Rect, fill: Fill) {
        self.context
            .set_fill_style(&JsValue::from_str(&fill.to_css()));
        self.context
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
    }
}
