//! Player session: search status, loaded track, transport state and volume
//!
//! The session owns no I/O. The host resolves queries itself and reports
//! the outcome through [`PlayerSession::finish_search`], forwards media
//! element events, and hands a [`MediaTransport`] in for commands.

use crate::card::PlayerCard;
use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::transport::MediaTransport;
use crate::types::{PlaybackState, ResolvedTrack, Track};
use crate::volume::Volume;
use tracing::{debug, warn};

/// Shown when track resolution fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load track. Please try again later.";

/// Shown when the transport refuses to start or pause
pub const PLAY_FAILED_MESSAGE: &str = "Failed to play audio. Please try again.";

/// Shown when the media element reports a playback error
pub const MEDIA_ERROR_MESSAGE: &str = "Error playing audio. Please try again.";

/// State behind the player card
#[derive(Debug, Default)]
pub struct PlayerSession {
    query: String,
    track: Option<Track>,
    stream_url: Option<String>,
    state: PlaybackState,
    error: Option<String>,
    volume: Volume,
    events: Vec<PlaybackEvent>,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Search =====

    /// Start resolving `query`
    ///
    /// Returns false (and changes nothing) for an empty query.
    pub fn begin_search(&mut self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }

        debug!("Searching for {:?}", query);
        self.query = query.to_string();
        self.error = None;
        self.set_state(PlaybackState::Loading);
        true
    }

    /// Report the outcome of the search started by `begin_search`
    pub fn finish_search(&mut self, result: Result<Option<ResolvedTrack>>) {
        match result {
            Ok(Some(resolved)) => {
                let track = Track::from(resolved);
                debug!("Loaded track: {} by {}", track.title, track.artist);
                self.stream_url = Some(track.url.clone());
                self.events.push(PlaybackEvent::TrackChanged {
                    title: track.title.clone(),
                    artist: track.artist.clone(),
                    url: track.url.clone(),
                });
                self.track = Some(track);
            }
            Ok(None) => {
                debug!("No tracks found for {:?}", self.query);
                self.track = None;
                self.stream_url = None;
            }
            Err(e) => {
                warn!("Error loading track: {}", e);
                self.track = None;
                self.stream_url = None;
                self.set_error(LOAD_FAILED_MESSAGE);
            }
        }

        self.set_state(PlaybackState::Stopped);
    }

    // ===== Transport =====

    /// Play when paused or stopped, pause when playing
    ///
    /// Ignored while loading or without a stream. A transport failure keeps
    /// the current state and surfaces an error message.
    pub fn toggle_play<T>(&mut self, transport: &mut T)
    where
        T: MediaTransport + ?Sized,
    {
        if self.stream_url.is_none() || self.state == PlaybackState::Loading {
            return;
        }

        let result = if self.state == PlaybackState::Playing {
            transport.pause().map(|()| PlaybackState::Paused)
        } else {
            transport
                .resume_output()
                .and_then(|()| transport.play())
                .map(|()| PlaybackState::Playing)
        };

        match result {
            Ok(next) => self.set_state(next),
            Err(e) => {
                warn!("Error playing audio: {}", e);
                self.set_error(PLAY_FAILED_MESSAGE);
            }
        }
    }

    /// Toggle on the page's media element, if it has one
    ///
    /// Without an element nothing happens: no state change and no error.
    pub fn toggle_play_on<T: MediaTransport>(&mut self, transport: Option<&mut T>) {
        if let Some(transport) = transport {
            self.toggle_play(transport);
        }
    }

    /// Set the volume slider (0-100) and push the gain to the element
    pub fn set_volume<T>(&mut self, level: u8, transport: &mut T)
    where
        T: MediaTransport + ?Sized,
    {
        self.volume.set_level(level);
        transport.set_volume(self.volume.gain());
        self.events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
        });
    }

    /// Move the slider; the gain reaches the element only if one exists
    pub fn set_volume_on<T: MediaTransport>(&mut self, level: u8, transport: Option<&mut T>) {
        match transport {
            Some(transport) => self.set_volume(level, transport),
            None => {
                self.volume.set_level(level);
                self.events.push(PlaybackEvent::VolumeChanged {
                    level: self.volume.level(),
                });
            }
        }
    }

    // ===== Media element events =====

    /// The element started playing
    ///
    /// Ignored while a search is in flight; the old stream is on its way out.
    pub fn on_media_play(&mut self) {
        if self.stream_url.is_some() && self.state != PlaybackState::Loading {
            self.set_state(PlaybackState::Playing);
        }
    }

    /// The element paused (including reaching the end)
    pub fn on_media_pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// The element failed to load or decode the stream
    pub fn on_media_error(&mut self) {
        warn!("Media element reported an error");
        self.set_error(MEDIA_ERROR_MESSAGE);
        if self.state != PlaybackState::Loading {
            self.set_state(PlaybackState::Stopped);
        }
    }

    // ===== Queries =====

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn stream_url(&self) -> Option<&str> {
        self.stream_url.as_deref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_loading(&self) -> bool {
        self.state == PlaybackState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    /// Current view of the player card
    pub fn card(&self) -> PlayerCard {
        PlayerCard::from_session(self)
    }

    /// Drain queued events, oldest first
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.events.push(PlaybackEvent::StateChanged { state });
        }
    }

    fn set_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.events.push(PlaybackEvent::Error {
            message: message.to_string(),
        });
    }
}
