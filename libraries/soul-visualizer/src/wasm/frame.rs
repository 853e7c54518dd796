//! `requestAnimationFrame` scheduling

use super::js_error_message;
use crate::error::{Result, VisualizerError};
use crate::scheduler::{FrameCallback, FrameHandle, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// Schedules frames on the browser's display refresh
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new() -> std::result::Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        Ok(Self { window })
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        // Freed by wasm-bindgen after the single call. A cancelled frame keeps
        // its closure alive, at most one per teardown.
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        let id = self
            .window
            .request_animation_frame(closure.unchecked_ref())
            .map_err(|e| VisualizerError::Scheduler(js_error_message(&e)))?;
        Ok(FrameHandle(i64::from(id)))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Ok(id) = i32::try_from(handle.0) {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}
