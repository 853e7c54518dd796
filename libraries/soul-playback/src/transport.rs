//! Media element transport
//!
//! Abstracts the element that actually plays the stream (an HTML audio
//! element in the browser, a PCM element natively) so the session can drive
//! it without knowing which.

use crate::error::Result;

/// Controls the media element bound to the player card
pub trait MediaTransport {
    /// Wake the platform audio output if it was suspended
    ///
    /// Browsers keep audio suspended until a user gesture.
    fn resume_output(&mut self) -> Result<()> {
        Ok(())
    }

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Set element volume (linear, 0.0 - 1.0)
    fn set_volume(&mut self, gain: f32);
}
