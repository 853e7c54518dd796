//! Player events
//!
//! Queued by the session and drained by the UI layer:
//! - State changes (loading/play/pause/stop)
//! - Track changes (a search resolved to a new track)
//! - Volume changes
//! - User-facing errors

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track was loaded
    TrackChanged {
        title: String,
        artist: String,
        /// Stream URL for the media element
        url: String,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Error shown to the user
    Error {
        /// Error message
        message: String,
    },
}
