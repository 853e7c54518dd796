//! Error types for the spectrum visualizer

use thiserror::Error;

/// Visualizer errors
#[derive(Debug, Error)]
pub enum VisualizerError {
    /// Analyser window size is not a power of two in the supported range
    #[error("Invalid window size: {0} (must be a power of two between 32 and 32768)")]
    InvalidWindowSize(usize),

    /// Analyser parameter out of range
    #[error("Invalid analyser config: {0}")]
    InvalidConfig(String),

    /// The platform refused to open an audio processing context
    #[error("Audio context unavailable: {0}")]
    ContextUnavailable(String),

    /// The media element already feeds another analysis graph
    #[error("Media element is already tapped by another audio context")]
    SourceAlreadyTapped,

    /// Creating or linking a graph node failed
    #[error("Graph construction failed: {0}")]
    GraphConstruction(String),

    /// The platform reported an error while closing a context
    #[error("Failed to close audio context: {0}")]
    ContextClose(String),

    /// The context was used after it was closed
    #[error("Audio context is closed")]
    ContextClosed,

    /// The host refused to schedule an animation frame
    #[error("Frame scheduling failed: {0}")]
    Scheduler(String),

    /// Audio file could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for visualizer operations
pub type Result<T> = std::result::Result<T, VisualizerError>;
