//! Core types for the player card

use serde::{Deserialize, Serialize};

/// Cover shown when a track has no artwork (and before any track is loaded)
pub const DEFAULT_COVER_URL: &str =
    "https://images.unsplash.com/photo-1470225620780-dba8ba36b745?w=400";

/// Artist shown when the resolver returns none
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album shown when the resolver returns none
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Title shown before any track is loaded
pub const EMPTY_TITLE: &str = "Search for a track";

/// Raw result of a track lookup
///
/// Whatever service resolves a query produces one of these; optional fields
/// are filled with display fallbacks when converted into a [`Track`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    /// Playable stream URL
    pub stream_url: String,

    /// Track title
    pub title: String,

    /// Uploader / artist name
    pub artist: Option<String>,

    /// Album (or genre, for services without albums)
    pub album: Option<String>,

    /// Artwork URL at the service's default size
    pub artwork_url: Option<String>,
}

/// Track loaded into the player card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,

    /// Stream URL handed to the media element
    pub url: String,

    /// Cover art URL
    pub cover: String,

    /// Lyrics, one line per entry (empty when unknown)
    pub lyrics: Vec<String>,
}

impl From<ResolvedTrack> for Track {
    fn from(resolved: ResolvedTrack) -> Self {
        Self {
            title: resolved.title,
            artist: non_empty(resolved.artist).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            album: non_empty(resolved.album).unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            url: resolved.stream_url,
            cover: non_empty(resolved.artwork_url)
                .map(|url| upgrade_artwork_url(&url))
                .unwrap_or_else(|| DEFAULT_COVER_URL.to_string()),
            lyrics: Vec::new(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Ask for the 500x500 rendition of a `-large` artwork URL
///
/// Only the first occurrence is rewritten; other URLs pass through.
pub fn upgrade_artwork_url(url: &str) -> String {
    url.replacen("-large", "-t500x500", 1)
}

/// Playback state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing
    #[default]
    Stopped,

    /// A search is in flight
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved() -> ResolvedTrack {
        ResolvedTrack {
            stream_url: "https://cdn.example/stream.mp3".to_string(),
            title: "Night Drive".to_string(),
            artist: Some("Neon".to_string()),
            album: Some("Synthwave".to_string()),
            artwork_url: Some("https://img.example/artworks-000-large.jpg".to_string()),
        }
    }

    #[test]
    fn track_from_complete_result() {
        let track = Track::from(resolved());
        assert_eq!(track.title, "Night Drive");
        assert_eq!(track.artist, "Neon");
        assert_eq!(track.album, "Synthwave");
        assert_eq!(track.url, "https://cdn.example/stream.mp3");
        assert_eq!(track.cover, "https://img.example/artworks-000-t500x500.jpg");
        assert!(track.lyrics.is_empty());
    }

    #[test]
    fn track_fallbacks() {
        let track = Track::from(ResolvedTrack {
            artist: None,
            album: Some(String::new()),
            artwork_url: None,
            ..resolved()
        });
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.album, UNKNOWN_ALBUM);
        assert_eq!(track.cover, DEFAULT_COVER_URL);
    }

    #[test]
    fn artwork_rewrite_only_touches_first_large() {
        assert_eq!(
            upgrade_artwork_url("a-large-large.png"),
            "a-t500x500-large.png"
        );
        assert_eq!(upgrade_artwork_url("plain.png"), "plain.png");
    }
}
