//! Soul Spectrum Library
//!
//! Headless renderer for the spectrum visualizer: decodes an audio file,
//! plays it through the player session and writes the visualizer's frames
//! as PNG images.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod inspect;
pub mod render;
pub mod transport;

// Re-export commonly used types for convenience
pub use config::SpectrumConfig;
pub use error::{RenderError, Result};
pub use inspect::{inspect_file, InspectReport};
pub use render::{render_file, write_png, RenderSummary};
pub use transport::ElementTransport;
