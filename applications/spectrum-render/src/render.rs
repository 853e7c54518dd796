/// Offline render loop
///
/// Plays a decoded file through the player session, pumps the visualizer
/// once per simulated display frame and writes selected frames as PNG.
use crate::config::SpectrumConfig;
use crate::error::{RenderError, Result};
use crate::transport::ElementTransport;
use serde::Serialize;
use soul_playback::{PlaybackError, PlayerSession, ResolvedTrack};
use soul_visualizer::native::{decode_file, NativeBackend, PcmElement};
use soul_visualizer::config::{SURFACE_HEIGHT, SURFACE_WIDTH};
use soul_visualizer::{
    BindOutcome, DrawingSurface, PixelSurface, QueueScheduler, SpectrumVisualizer,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// What a render produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    pub title: String,

    /// Frames drawn, including the one drawn on bind
    pub frames_rendered: u64,

    /// Bars per frame
    pub bars: usize,

    /// PNG files written, in frame order
    pub written: Vec<PathBuf>,

    /// Seconds of audio played
    pub audio_secs: f64,
}

/// Render `input` to PNG frames under `config.render.output_dir`
///
/// The surface is always 800x200 and the analyser always uses its default
/// window; `[analyser]` settings only affect `inspect`.
pub fn render_file(input: &Path, config: &SpectrumConfig) -> Result<RenderSummary> {
    config.validate()?;

    let title = input
        .file_stem()
        .map_or_else(|| input.display().to_string(), |s| s.to_string_lossy().into_owned());

    let mut session = PlayerSession::new();
    session.begin_search(&title);

    let track = match decode_file(input) {
        Ok(track) => track,
        Err(e) => {
            session.finish_search(Err(PlaybackError::Resolution(e.to_string())));
            return Err(e.into());
        }
    };

    session.finish_search(Ok(Some(ResolvedTrack {
        stream_url: input.display().to_string(),
        title: title.clone(),
        artist: None,
        album: None,
        artwork_url: None,
    })));

    let sample_rate = track.sample_rate();
    let element = PcmElement::new(track);
    let mut transport = ElementTransport::new(element.clone());

    std::fs::create_dir_all(&config.render.output_dir)?;

    let backend = NativeBackend::new();
    let surface = Rc::new(RefCell::new(PixelSurface::new(SURFACE_WIDTH, SURFACE_HEIGHT)));
    let scheduler = Rc::new(QueueScheduler::new());
    let mut visualizer =
        SpectrumVisualizer::new(backend, Rc::clone(&surface), Rc::clone(&scheduler));

    session.set_volume(config.render.volume, &mut transport);
    session.toggle_play(&mut transport);
    if let Some(message) = session.error() {
        return Err(RenderError::Bind(message.to_string()));
    }

    if let BindOutcome::Failed(e) = visualizer.bind(Some(transport.element())) {
        return Err(RenderError::Bind(e.to_string()));
    }

    let fps = config.render.fps;
    let step = (sample_rate / fps).max(1) as usize;
    let limit = config
        .render
        .duration_secs
        .map(|secs| (secs * f64::from(sample_rate)).round() as usize);

    info!(
        "Rendering {:?}: {} Hz, {} frames per tick at {} fps",
        title, sample_rate, step, fps
    );

    let mut written = Vec::new();
    let mut frame: u64 = 0;
    write_if_selected(&surface, frame, config, &mut written)?;

    loop {
        let position = element.advance(step);
        frame += 1;
        scheduler.run_frame(frame as f64 * 1000.0 / f64::from(fps));
        write_if_selected(&surface, frame, config, &mut written)?;

        if element.is_ended() {
            session.on_media_pause();
            debug!("Track ended after {} frames", frame);
            break;
        }
        if limit.is_some_and(|limit| position >= limit) {
            session.toggle_play(&mut transport);
            debug!("Duration limit reached after {} frames", frame);
            break;
        }
        if !element.is_playing() {
            warn!("Element stopped before the end of the track");
            break;
        }
    }

    let frames_rendered = visualizer.frames_rendered();
    let bars = visualizer.snapshot().map_or(0, |snapshot| snapshot.len());
    visualizer.unmount();

    let summary = RenderSummary {
        title,
        frames_rendered,
        bars,
        written,
        audio_secs: element.position().as_secs_f64(),
    };
    info!(
        "Rendered {} frames, wrote {} PNG files",
        summary.frames_rendered,
        summary.written.len()
    );
    Ok(summary)
}

fn write_if_selected(
    surface: &Rc<RefCell<PixelSurface>>,
    frame: u64,
    config: &SpectrumConfig,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    if frame % u64::from(config.render.every) != 0 {
        return Ok(());
    }

    let path = config.render.output_dir.join(format!("frame_{:05}.png", frame));
    write_png(&surface.borrow(), &path)?;
    written.push(path);
    Ok(())
}

/// Save a surface as an RGBA PNG
pub fn write_png(surface: &PixelSurface, path: &Path) -> Result<()> {
    let (width, height) = (surface.width(), surface.height());
    let image = image::RgbaImage::from_raw(width, height, surface.pixels().to_vec()).ok_or_else(
        || RenderError::Config(format!("surface is not {}x{} RGBA", width, height)),
    )?;
    image.save(path)?;
    Ok(())
}
