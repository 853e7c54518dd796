//! WASM-compatible PlayerSession wrapper

use super::transport::AudioElementTransport;
use crate::{PlaybackError, PlayerSession, ResolvedTrack};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// WASM-compatible player session
///
/// Wraps [`PlayerSession`] with a JavaScript-friendly API. Queued events are
/// delivered to the `onEvent` callback after every call.
#[wasm_bindgen]
pub struct WasmPlayerSession {
    inner: PlayerSession,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayerSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        Self {
            inner: PlayerSession::new(),
            on_event: None,
        }
    }

    /// Register the event callback (receives one event object per call)
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    // ===== Search =====

    #[wasm_bindgen(js_name = beginSearch)]
    pub fn begin_search(&mut self, query: &str) -> bool {
        let started = self.inner.begin_search(query);
        self.flush_events();
        started
    }

    /// Finish a search with a resolved track object, or `null` for no match
    #[wasm_bindgen(js_name = finishSearch)]
    pub fn finish_search(&mut self, track: JsValue) -> Result<(), JsValue> {
        let resolved: Option<ResolvedTrack> = serde_wasm_bindgen::from_value(track)?;
        self.inner.finish_search(Ok(resolved));
        self.flush_events();
        Ok(())
    }

    /// Finish a search that failed upstream
    #[wasm_bindgen(js_name = failSearch)]
    pub fn fail_search(&mut self, reason: &str) {
        self.inner
            .finish_search(Err(PlaybackError::Resolution(reason.to_string())));
        self.flush_events();
    }

    // ===== Transport =====

    /// Play or pause `audio`; ignored until the page has an element
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self, audio: Option<HtmlAudioElement>) {
        let mut transport = audio.map(AudioElementTransport::new);
        self.inner.toggle_play_on(transport.as_mut());
        self.flush_events();
    }

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: u8, audio: Option<HtmlAudioElement>) {
        let mut transport = audio.map(AudioElementTransport::new);
        self.inner.set_volume_on(level, transport.as_mut());
        self.flush_events();
    }

    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> u8 {
        self.inner.volume()
    }

    // ===== Media element events =====

    #[wasm_bindgen(js_name = mediaPlayed)]
    pub fn media_played(&mut self) {
        self.inner.on_media_play();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = mediaPaused)]
    pub fn media_paused(&mut self) {
        self.inner.on_media_pause();
        self.flush_events();
    }

    #[wasm_bindgen(js_name = mediaFailed)]
    pub fn media_failed(&mut self) {
        self.inner.on_media_error();
        self.flush_events();
    }

    // ===== State Queries =====

    /// Player card view as a plain object
    pub fn card(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.card())?)
    }

    #[wasm_bindgen(getter, js_name = streamUrl)]
    pub fn stream_url(&self) -> Option<String> {
        self.inner.stream_url().map(str::to_string)
    }

    fn flush_events(&mut self) {
        let events = self.inner.take_events();
        let Some(callback) = &self.on_event else {
            return;
        };
        for event in events {
            match serde_wasm_bindgen::to_value(&event) {
                Ok(value) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                        web_sys::console::error_1(&e);
                    }
                }
                Err(e) => web_sys::console::error_1(&JsValue::from(e)),
            }
        }
    }
}

impl Default for WasmPlayerSession {
    fn default() -> Self {
        Self::new()
    }
}
