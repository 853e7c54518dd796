//! Soul Player - Spectrum Visualizer
//!
//! Real-time bar spectrum of whatever audio element the player hands over.
//!
//! This crate provides:
//! - A lifecycle state machine over the audio analysis graph
//!   (`Unbound` / `Bound` / `Failed`), rebuilt whenever the source changes
//! - A render loop re-scheduled every display frame
//! - A deterministic bar layout (800x200 surface, 128 bins, hue by index)
//! - A native backend (Symphonia decoding + rustfft analyser) and a browser
//!   backend (Web Audio + canvas), behind the `native` and `wasm` features
//!
//! # Architecture
//!
//! Platform pieces come in through traits:
//! - [`AudioBackend`] / [`ProcessingContext`] / [`Analyser`]: the audio graph
//! - [`DrawingSurface`]: where bars are drawn
//! - [`FrameScheduler`]: when the next frame runs
//!
//! The visualizer never touches playback state.
//!
//! # Example: Headless Rendering
//!
//! ```rust
//! use soul_visualizer::native::{NativeBackend, PcmElement, PcmTrack};
//! use soul_visualizer::{PixelSurface, QueueScheduler, SpectrumVisualizer};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let track = PcmTrack::new(vec![0.25; 44100], 44100);
//! let element = PcmElement::new(track);
//!
//! let surface = Rc::new(RefCell::new(PixelSurface::new(800, 200)));
//! let scheduler = Rc::new(QueueScheduler::new());
//! let mut visualizer =
//!     SpectrumVisualizer::new(NativeBackend::new(), Rc::clone(&surface), Rc::clone(&scheduler));
//!
//! visualizer.bind(Some(&element));
//! element.play();
//!
//! for frame in 1..=10 {
//!     element.advance(44100 / 60);
//!     scheduler.run_frame(f64::from(frame) * 1000.0 / 60.0);
//! }
//!
//! assert_eq!(visualizer.frames_rendered(), 11);
//! visualizer.unmount();
//! ```

#[cfg(feature = "native")]
mod analyser;
mod color;
pub mod config;
mod error;
mod graph;
mod layout;
mod painter;
mod scheduler;
mod snapshot;
mod surface;
mod visualizer;

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
#[cfg(feature = "native")]
pub use analyser::FftAnalyser;
pub use color::Fill;
pub use config::AnalyserConfig;
pub use error::{Result, VisualizerError};
pub use graph::{Analyser, AnalysisGraph, AudioBackend, ContextGuard, ElementOf, ProcessingContext};
pub use layout::{BarLayout, Rect};
pub use painter::paint_spectrum;
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler, QueueScheduler};
pub use snapshot::FrequencySnapshot;
pub use surface::{DrawingSurface, PixelSurface};
pub use visualizer::{BindOutcome, SpectrumVisualizer, VisualizerState};
