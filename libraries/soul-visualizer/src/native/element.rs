//! Native media element: decoded PCM plus a playhead

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mono PCM audio held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct PcmTrack {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl PcmTrack {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Build a mono track by averaging interleaved channels
    pub fn from_interleaved(samples: &[f32], channels: usize, sample_rate: u32) -> Self {
        let channels = channels.max(1);
        let mono = samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();
        Self::new(mono, sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length in sample frames
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.sample_rate))
    }
}

#[derive(Debug)]
struct ElementState {
    track: PcmTrack,
    cursor: AtomicUsize,
    playing: AtomicBool,
    /// f32 bits
    volume: AtomicU32,
    tapped: AtomicBool,
}

/// Shared handle to a playable PCM track
///
/// Clones refer to the same element; equality is identity, so two elements
/// over identical audio are still different sources.
#[derive(Debug, Clone)]
pub struct PcmElement {
    state: Arc<ElementState>,
}

impl PcmElement {
    pub fn new(track: PcmTrack) -> Self {
        Self {
            state: Arc::new(ElementState {
                track,
                cursor: AtomicUsize::new(0),
                playing: AtomicBool::new(false),
                volume: AtomicU32::new(1.0f32.to_bits()),
                tapped: AtomicBool::new(false),
            }),
        }
    }

    pub fn track(&self) -> &PcmTrack {
        &self.state.track
    }

    pub fn play(&self) {
        self.state.playing.store(true, Ordering::Release);
    }

    pub fn pause(&self) {
        self.state.playing.store(false, Ordering::Release);
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing.load(Ordering::Acquire)
    }

    /// Linear gain 0.0 - 1.0
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.state.volume.load(Ordering::Acquire))
    }

    pub fn set_volume(&self, volume: f32) {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.state.volume.store(volume.to_bits(), Ordering::Release);
    }

    /// Playhead in sample frames
    pub fn position_frames(&self) -> usize {
        self.state.cursor.load(Ordering::Acquire)
    }

    pub fn position(&self) -> Duration {
        let rate = self.state.track.sample_rate();
        if rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.position_frames() as f64 / f64::from(rate))
    }

    /// Move the playhead, clamped to the track length
    pub fn seek(&self, position: Duration) {
        let frame =
            (position.as_secs_f64() * f64::from(self.state.track.sample_rate())).round() as usize;
        self.state
            .cursor
            .store(frame.min(self.state.track.len()), Ordering::Release);
    }

    /// Advance the playhead by `frames` while playing
    ///
    /// Playback pauses itself at the end of the track. Returns the new
    /// playhead.
    pub fn advance(&self, frames: usize) -> usize {
        if !self.is_playing() {
            return self.position_frames();
        }
        let len = self.state.track.len();
        let next = self.position_frames().saturating_add(frames).min(len);
        self.state.cursor.store(next, Ordering::Release);
        if next >= len {
            self.pause();
        }
        next
    }

    pub fn is_ended(&self) -> bool {
        self.position_frames() >= self.state.track.len()
    }

    /// Copy the samples just before the playhead into `out`, scaled by volume
    ///
    /// Positions before the start of the track read as silence.
    pub fn fill_window(&self, out: &mut [f32]) {
        let samples = self.state.track.samples();
        let end = self.position_frames().min(samples.len());
        let start = end.saturating_sub(out.len());
        let available = &samples[start..end];
        let padding = out.len() - available.len();
        let volume = self.volume();

        out[..padding].fill(0.0);
        for (slot, &sample) in out[padding..].iter_mut().zip(available) {
            *slot = sample * volume;
        }
    }

    /// Claim the element for a Source Tap; false if already claimed
    pub(crate) fn try_acquire_tap(&self) -> bool {
        self.state
            .tapped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn release_tap(&self) {
        self.state.tapped.store(false, Ordering::Release);
    }

    pub fn is_tapped(&self) -> bool {
        self.state.tapped.load(Ordering::Acquire)
    }
}

impl PartialEq for PcmElement {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for PcmElement {}
