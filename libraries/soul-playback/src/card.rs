//! Render-ready view of the player card

use crate::session::PlayerSession;
use crate::types::{DEFAULT_COVER_URL, EMPTY_TITLE, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use serde::{Deserialize, Serialize};

/// Everything the player card displays, with fallbacks applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub title: String,

    /// "By <artist>"
    pub artist_line: String,

    pub album: String,
    pub cover_url: String,

    /// Whether the play/pause button is enabled
    pub can_toggle: bool,

    /// Show the spinner instead of play/pause
    pub is_loading: bool,

    /// Show pause rather than play
    pub is_playing: bool,

    /// Error banner text
    pub error: Option<String>,

    /// Replaces the card when a search found nothing
    pub not_found_message: Option<String>,

    pub lyrics: Vec<String>,
}

impl PlayerCard {
    pub(crate) fn from_session(session: &PlayerSession) -> Self {
        let track = session.track();
        let is_loading = session.is_loading();

        let not_found_message = if !session.query().is_empty() && track.is_none() && !is_loading
        {
            Some(format!("No tracks found matching \"{}\"", session.query()))
        } else {
            None
        };

        Self {
            title: track.map_or(EMPTY_TITLE, |t| t.title.as_str()).to_string(),
            artist_line: format!(
                "By {}",
                track.map_or(UNKNOWN_ARTIST, |t| t.artist.as_str())
            ),
            album: track.map_or(UNKNOWN_ALBUM, |t| t.album.as_str()).to_string(),
            cover_url: track.map_or(DEFAULT_COVER_URL, |t| t.cover.as_str()).to_string(),
            can_toggle: !is_loading && session.stream_url().is_some(),
            is_loading,
            is_playing: session.is_playing(),
            error: session.error().map(str::to_string),
            not_found_message,
            lyrics: track.map(|t| t.lyrics.clone()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::session::PlayerSession;
    use crate::types::{ResolvedTrack, DEFAULT_COVER_URL};

    #[test]
    fn empty_card() {
        let card = PlayerSession::new().card();
        assert_eq!(card.title, "Search for a track");
        assert_eq!(card.artist_line, "By Unknown Artist");
        assert_eq!(card.album, "Unknown Album");
        assert_eq!(card.cover_url, DEFAULT_COVER_URL);
        assert!(!card.can_toggle);
        assert_eq!(card.not_found_message, None);
    }

    #[test]
    fn not_found_only_after_search_completes() {
        let mut session = PlayerSession::new();
        session.begin_search("lofi beats");
        assert_eq!(session.card().not_found_message, None);

        session.finish_search(Ok(None));
        assert_eq!(
            session.card().not_found_message.as_deref(),
            Some("No tracks found matching \"lofi beats\"")
        );
    }

    #[test]
    fn loaded_track_card() {
        let mut session = PlayerSession::new();
        session.begin_search("q");
        session.finish_search(Ok(Some(ResolvedTrack {
            stream_url: "https://cdn.example/a.mp3".to_string(),
            title: "Tides".to_string(),
            artist: Some("Shore".to_string()),
            album: None,
            artwork_url: None,
        })));

        let card = session.card();
        assert_eq!(card.title, "Tides");
        assert_eq!(card.artist_line, "By Shore");
        assert_eq!(card.album, "Unknown Album");
        assert!(card.can_toggle);
        assert!(!card.is_playing);
        assert!(card.lyrics.is_empty());
    }
}
