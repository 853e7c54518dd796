//! Native backend: decoded PCM elements analysed in-process
//!
//! Pair [`NativeBackend`] with [`crate::PixelSurface`] and
//! [`crate::QueueScheduler`] to run the visualizer without a browser.

mod backend;
mod decode;
mod element;

pub use backend::{NativeAnalyser, NativeBackend, NativeContext, DEFAULT_MAX_LIVE_CONTEXTS};
pub use decode::decode_file;
pub use element::{PcmElement, PcmTrack};
