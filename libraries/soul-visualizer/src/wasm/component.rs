//! JavaScript-facing visualizer component

use super::{AnimationFrameScheduler, CanvasSurface, WebAudioBackend};
use crate::visualizer::{BindOutcome, SpectrumVisualizer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAudioElement, HtmlCanvasElement};

/// Spectrum visualizer mounted on a canvas
///
/// ```js
/// const viz = new WasmSpectrumVisualizer(canvas);
/// viz.bind(audioElement);   // rebinds when the element changes
/// viz.bind(null);           // idle
/// viz.unmount();
/// ```
#[wasm_bindgen]
pub struct WasmSpectrumVisualizer {
    inner: SpectrumVisualizer<WebAudioBackend, CanvasSurface, AnimationFrameScheduler>,
}

#[wasm_bindgen]
impl WasmSpectrumVisualizer {
    /// Mount on `canvas`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<WasmSpectrumVisualizer, JsValue> {
        console_error_panic_hook::set_once();

        let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas)?));
        let scheduler = Rc::new(AnimationFrameScheduler::new()?);

        Ok(Self {
            inner: SpectrumVisualizer::new(WebAudioBackend, surface, scheduler),
        })
    }

    /// Bind to an audio element, or pass `null` to go idle
    ///
    /// Never throws; construction failures are reported on the console.
    pub fn bind(&mut self, audio: Option<HtmlAudioElement>) {
        if let BindOutcome::Failed(e) = self.inner.bind(audio.as_ref()) {
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "Spectrum visualizer unavailable: {}",
                e
            )));
        }
    }

    /// Stop drawing and close the audio context
    pub fn unmount(&mut self) {
        self.inner.unmount();
    }

    #[wasm_bindgen(getter, js_name = isBound)]
    pub fn is_bound(&self) -> bool {
        self.inner.is_bound()
    }

    #[wasm_bindgen(getter, js_name = framesRendered)]
    pub fn frames_rendered(&self) -> f64 {
        self.inner.frames_rendered() as f64
    }
}
