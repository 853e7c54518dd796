//! WASM bindings for soul-playback
//!
//! Exposes the player session to JavaScript, driving an `<audio>` element as
//! its transport.

// wasm-bindgen expands to unsafe glue
#![allow(unsafe_code)]

mod session;
mod transport;

pub use session::WasmPlayerSession;
pub use transport::AudioElementTransport;
