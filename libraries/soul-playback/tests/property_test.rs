//! Property-based tests for the player session
//!
//! Uses proptest to drive random command sequences and check invariants
//! that must hold after every step.

use proptest::prelude::*;
use soul_playback::{
    MediaTransport, PlaybackState, PlayerSession, ResolvedTrack, Result, Volume,
};

// ===== Helpers =====

struct FlakyTransport {
    fail_next: bool,
}

impl MediaTransport for FlakyTransport {
    fn play(&mut self) -> Result<()> {
        if self.fail_next {
            return Err(soul_playback::PlaybackError::Transport("refused".into()));
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _gain: f32) {}
}

#[derive(Debug, Clone)]
enum Step {
    Search(String),
    Found,
    NotFound,
    Failed,
    Toggle { fail: bool },
    Volume(u8),
    MediaPlay,
    MediaPause,
    MediaError,
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(Step::Search),
        Just(Step::Found),
        Just(Step::NotFound),
        Just(Step::Failed),
        any::<bool>().prop_map(|fail| Step::Toggle { fail }),
        any::<u8>().prop_map(Step::Volume),
        Just(Step::MediaPlay),
        Just(Step::MediaPause),
        Just(Step::MediaError),
    ]
}

fn apply(session: &mut PlayerSession, step: &Step) {
    let mut transport = FlakyTransport { fail_next: false };
    match step {
        Step::Search(query) => {
            session.begin_search(query);
        }
        Step::Found if session.is_loading() => session.finish_search(Ok(Some(ResolvedTrack {
            stream_url: "https://cdn.example/t.mp3".to_string(),
            title: "T".to_string(),
            artist: None,
            album: None,
            artwork_url: None,
        }))),
        Step::NotFound if session.is_loading() => session.finish_search(Ok(None)),
        Step::Failed if session.is_loading() => session.finish_search(Err(
            soul_playback::PlaybackError::Resolution("down".into()),
        )),
        Step::Found | Step::NotFound | Step::Failed => {}
        Step::Toggle { fail } => {
            transport.fail_next = *fail;
            session.toggle_play(&mut transport);
        }
        Step::Volume(level) => session.set_volume(*level, &mut transport),
        Step::MediaPlay => session.on_media_play(),
        Step::MediaPause => session.on_media_pause(),
        Step::MediaError => session.on_media_error(),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: volume level never exceeds 100 and gain stays in [0, 1]
    #[test]
    fn volume_is_always_clamped(level in any::<u8>()) {
        let volume = Volume::new(level);
        prop_assert!(volume.level() <= 100);
        prop_assert!((0.0..=1.0).contains(&volume.gain()));
        prop_assert_eq!(volume.level(), level.min(100));
    }

    /// Property: the card never offers play/pause while loading or without
    /// a stream, and never shows playing without a stream
    #[test]
    fn card_stays_consistent(steps in prop::collection::vec(arbitrary_step(), 1..60)) {
        let mut session = PlayerSession::new();

        for step in &steps {
            apply(&mut session, step);
            let card = session.card();

            if card.is_loading {
                prop_assert!(!card.can_toggle);
                prop_assert!(card.not_found_message.is_none());
            }
            if session.stream_url().is_none() {
                prop_assert!(!card.can_toggle);
                prop_assert!(session.state() != PlaybackState::Playing);
            }
            prop_assert_eq!(card.is_playing, session.state() == PlaybackState::Playing);
            prop_assert!(session.volume() <= 100);
        }
    }

    /// Property: every queued state event reports an actual transition
    #[test]
    fn state_events_are_real_transitions(steps in prop::collection::vec(arbitrary_step(), 1..60)) {
        let mut session = PlayerSession::new();
        let mut previous = session.state();

        for step in &steps {
            apply(&mut session, step);
            for event in session.take_events() {
                if let soul_playback::PlaybackEvent::StateChanged { state } = event {
                    prop_assert_ne!(state, previous);
                    previous = state;
                }
            }
            prop_assert_eq!(previous, session.state());
        }
    }
}
