/// Renderer configuration
use crate::error::{RenderError, Result};
use serde::{Deserialize, Serialize};
use soul_visualizer::AnalyserConfig;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "spectrum.toml";

/// Environment prefix (`SOUL_SPECTRUM_RENDER__FPS=30`)
pub const ENV_PREFIX: &str = "SOUL_SPECTRUM";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpectrumConfig {
    #[serde(default = "default_render")]
    pub render: RenderSettings,

    /// Analyser used by `inspect`; rendering always uses the fixed default
    #[serde(default = "default_analyser")]
    pub analyser: AnalyserSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderSettings {
    /// Directory PNG frames are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Simulated display refresh rate
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Write every N-th frame
    #[serde(default = "default_every")]
    pub every: u32,

    /// Stop after this many seconds of audio (whole track when unset)
    #[serde(default)]
    pub duration_secs: Option<f64>,

    /// Player volume slider (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyserSettings {
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,

    #[serde(default = "default_smoothing")]
    pub smoothing_time_constant: f64,

    #[serde(default = "default_min_decibels")]
    pub min_decibels: f64,

    #[serde(default = "default_max_decibels")]
    pub max_decibels: f64,
}

impl AnalyserSettings {
    pub fn to_analyser_config(&self) -> AnalyserConfig {
        AnalyserConfig {
            fft_size: self.fft_size,
            smoothing_time_constant: self.smoothing_time_constant,
            min_decibels: self.min_decibels,
            max_decibels: self.max_decibels,
        }
    }
}

impl SpectrumConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `spectrum.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Double underscore separates sections so field names keep theirs
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.render.fps == 0 {
            return Err(RenderError::Config("fps must be at least 1".to_string()));
        }

        if self.render.every == 0 {
            return Err(RenderError::Config("every must be at least 1".to_string()));
        }

        if let Some(secs) = self.render.duration_secs {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(RenderError::Config(format!(
                    "duration_secs must be positive, got {}",
                    secs
                )));
            }
        }

        if self.render.volume > 100 {
            return Err(RenderError::Config(format!(
                "volume {} outside 0-100",
                self.render.volume
            )));
        }

        self.analyser.to_analyser_config().validate()?;

        Ok(())
    }
}

// Default values
fn default_render() -> RenderSettings {
    RenderSettings {
        output_dir: default_output_dir(),
        fps: default_fps(),
        every: default_every(),
        duration_secs: None,
        volume: default_volume(),
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./frames")
}

fn default_fps() -> u32 {
    60
}

fn default_every() -> u32 {
    1
}

fn default_volume() -> u8 {
    soul_playback::DEFAULT_VOLUME
}

fn default_analyser() -> AnalyserSettings {
    let defaults = AnalyserConfig::default();
    AnalyserSettings {
        fft_size: defaults.fft_size,
        smoothing_time_constant: defaults.smoothing_time_constant,
        min_decibels: defaults.min_decibels,
        max_decibels: defaults.max_decibels,
    }
}

fn default_fft_size() -> usize {
    AnalyserConfig::default().fft_size
}

fn default_smoothing() -> f64 {
    AnalyserConfig::default().smoothing_time_constant
}

fn default_min_decibels() -> f64 {
    AnalyserConfig::default().min_decibels
}

fn default_max_decibels() -> f64 {
    AnalyserConfig::default().max_decibels
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            render: default_render(),
            analyser: default_analyser(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = SpectrumConfig::default();
        config.validate().unwrap();
        assert_eq!(config.render.fps, 60);
        assert_eq!(config.analyser.fft_size, 256);
    }

    #[test]
    fn file_overrides_selected_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("spectrum.toml");
        std::fs::write(
            &path,
            "[render]\nfps = 24\nevery = 3\n\n[analyser]\nfft_size = 1024\n",
        )
        .unwrap();

        let config = SpectrumConfig::load(Some(&path)).unwrap();

        assert_eq!(config.render.fps, 24);
        assert_eq!(config.render.every, 3);
        assert_eq!(config.render.volume, 100);
        assert_eq!(config.analyser.fft_size, 1024);
        assert_eq!(config.analyser.smoothing_time_constant, 0.8);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = SpectrumConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(RenderError::Config(_))));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = SpectrumConfig::default();
        config.render.fps = 0;
        assert!(config.validate().is_err());

        let mut config = SpectrumConfig::default();
        config.render.every = 0;
        assert!(config.validate().is_err());

        let mut config = SpectrumConfig::default();
        config.render.duration_secs = Some(-1.0);
        assert!(config.validate().is_err());

        let mut config = SpectrumConfig::default();
        config.analyser.fft_size = 300;
        assert!(matches!(
            config.validate(),
            Err(RenderError::Visualizer(
                soul_visualizer::VisualizerError::InvalidWindowSize(300)
            ))
        ));
    }
}
