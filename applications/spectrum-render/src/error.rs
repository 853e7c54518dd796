/// Renderer error types
use soul_playback::PlaybackError;
use soul_visualizer::VisualizerError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Visualizer error: {0}")]
    Visualizer(#[from] VisualizerError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Could not bind visualizer: {0}")]
    Bind(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for RenderError {
    fn from(e: config::ConfigError) -> Self {
        RenderError::Config(e.to_string())
    }
}
