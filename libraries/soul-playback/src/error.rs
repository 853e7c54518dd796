//! Error types for the player session

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track resolution failed upstream
    #[error("Track resolution failed: {0}")]
    Resolution(String),

    /// The media element refused a transport command
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
