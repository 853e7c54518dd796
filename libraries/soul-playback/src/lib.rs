//! Soul Player - Player Card State
//!
//! Platform-agnostic state behind the search-and-play card.
//!
//! This crate provides:
//! - Search status (idle, loading, not found, failed)
//! - Loaded track with display fallbacks (artist, album, cover)
//! - Play/pause state driven by user commands and media element events
//! - Linear volume control (0-100%)
//! - A render-ready [`PlayerCard`] view
//!
//! # Architecture
//!
//! `soul-playback` performs no I/O:
//! - Track lookup happens in the host, which reports the outcome
//! - Audio output happens behind the [`MediaTransport`] trait
//! - The same session backs the browser card and the native renderer
//!
//! # Example
//!
//! ```rust
//! use soul_playback::{MediaTransport, PlaybackState, PlayerSession, ResolvedTrack, Result};
//!
//! struct Silent;
//!
//! impl MediaTransport for Silent {
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, _gain: f32) {}
//! }
//!
//! let mut session = PlayerSession::new();
//! session.begin_search("night drive");
//! assert!(session.card().is_loading);
//!
//! session.finish_search(Ok(Some(ResolvedTrack {
//!     stream_url: "https://cdn.example/night-drive.mp3".to_string(),
//!     title: "Night Drive".to_string(),
//!     artist: Some("Neon Coast".to_string()),
//!     album: None,
//!     artwork_url: None,
//! })));
//!
//! session.toggle_play(&mut Silent);
//! assert_eq!(session.state(), PlaybackState::Playing);
//! assert_eq!(session.card().artist_line, "By Neon Coast");
//! ```

mod card;
mod error;
mod events;
mod session;
mod transport;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use card::PlayerCard;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use session::{
    PlayerSession, LOAD_FAILED_MESSAGE, MEDIA_ERROR_MESSAGE, PLAY_FAILED_MESSAGE,
};
pub use transport::MediaTransport;
pub use types::{upgrade_artwork_url, PlaybackState, ResolvedTrack, Track};
pub use volume::{Volume, DEFAULT_VOLUME};
