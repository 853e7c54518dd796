//! Volume control for the media element
//!
//! The player slider runs 0-100% and maps linearly onto the element's
//! 0.0 - 1.0 volume; perceptual shaping is left to the platform.

/// Slider position when the player mounts
pub const DEFAULT_VOLUME: u8 = 100;

/// Volume level (0-100) and its linear gain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    level: u8,
}

impl Volume {
    /// Create a volume, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Current level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Linear gain for the media element (`level / 100`)
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_full_volume() {
        let vol = Volume::default();
        assert_eq!(vol.level(), 100);
        assert_eq!(vol.gain(), 1.0);
    }

    #[test]
    fn gain_is_linear() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert_eq!(Volume::new(50).gain(), 0.5);
        assert_eq!(Volume::new(25).gain(), 0.25);
    }

    #[test]
    fn level_is_clamped() {
        let mut vol = Volume::new(150);
        assert_eq!(vol.level(), 100);

        vol.set_level(42);
        assert_eq!(vol.level(), 42);

        vol.set_level(255);
        assert_eq!(vol.level(), 100);
    }
}
