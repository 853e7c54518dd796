//! WASM bindings for the spectrum visualizer
//!
//! Backs the visualizer with Web Audio (`AudioContext`, `AnalyserNode`), a
//! 2D canvas and `requestAnimationFrame`, and exposes it to JavaScript as
//! [`WasmSpectrumVisualizer`].

// wasm-bindgen expands to unsafe glue
#![allow(unsafe_code)]

mod backend;
mod canvas;
mod component;
mod frame;

pub use backend::{WebAnalyser, WebAudioBackend, WebAudioContext};
pub use canvas::CanvasSurface;
pub use component::WasmSpectrumVisualizer;
pub use frame::AnimationFrameScheduler;

use wasm_bindgen::JsValue;

/// Readable message for a thrown JS value
pub(crate) fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
