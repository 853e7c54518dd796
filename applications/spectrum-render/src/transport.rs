/// Player transport over a native PCM element
use soul_playback::{MediaTransport, Result};
use soul_visualizer::native::PcmElement;
use std::time::Duration;

/// Drives a [`PcmElement`] the way the browser drives an `<audio>` element
pub struct ElementTransport {
    element: PcmElement,
}

impl ElementTransport {
    pub fn new(element: PcmElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &PcmElement {
        &self.element
    }
}

impl MediaTransport for ElementTransport {
    fn play(&mut self) -> Result<()> {
        // Playing an ended element starts over
        if self.element.is_ended() {
            self.element.seek(Duration::ZERO);
        }
        self.element.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.element.pause();
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) {
        self.element.set_volume(gain);
    }
}
