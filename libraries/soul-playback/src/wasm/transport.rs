//! `<audio>` element transport

use crate::error::{PlaybackError, Result};
use crate::transport::MediaTransport;
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

fn js_error(value: &JsValue) -> PlaybackError {
    PlaybackError::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Drives an `HtmlAudioElement`
pub struct AudioElementTransport {
    element: HtmlAudioElement,
}

impl AudioElementTransport {
    pub fn new(element: HtmlAudioElement) -> Self {
        Self { element }
    }
}

impl MediaTransport for AudioElementTransport {
    fn play(&mut self) -> Result<()> {
        // Autoplay rejections arrive later as a media `error`/`pause` event
        self.element.play().map(|_| ()).map_err(|e| js_error(&e))
    }

    fn pause(&mut self) -> Result<()> {
        self.element.pause().map_err(|e| js_error(&e))
    }

    fn set_volume(&mut self, gain: f32) {
        self.element.set_volume(f64::from(gain));
    }
}
