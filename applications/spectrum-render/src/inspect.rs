/// Track inspection: decode a file and summarize its level and spectrum
use crate::config::SpectrumConfig;
use crate::error::Result;
use serde::Serialize;
use soul_visualizer::native::decode_file;
use soul_visualizer::FftAnalyser;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub sample_rate: u32,

    /// Mono sample frames
    pub frames: usize,

    pub duration_secs: f64,

    /// Largest absolute sample
    pub peak: f32,

    pub rms: f32,

    /// Bin with the highest average analyser level (first one on ties)
    pub dominant_bin: usize,

    /// Centre frequency of `dominant_bin`
    pub dominant_frequency_hz: f64,

    /// Average analyser level per bin (0-255)
    pub average_spectrum: Vec<u8>,
}

/// Decode `input` and run the analyser over it window by window
pub fn inspect_file(input: &Path, config: &SpectrumConfig) -> Result<InspectReport> {
    let analyser_config = config.analyser.to_analyser_config();
    let mut analyser = FftAnalyser::new(analyser_config)?;
    let track = decode_file(input)?;
    let samples = track.samples();

    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    let rms = if samples.is_empty() {
        0.0
    } else {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    };

    let bins = analyser.frequency_bin_count();
    let mut totals = vec![0u64; bins];
    let mut frame = vec![0u8; bins];
    let mut windows = 0u64;
    for window in samples.chunks_exact(analyser.fft_size()) {
        analyser.analyse(window, &mut frame);
        for (total, &level) in totals.iter_mut().zip(&frame) {
            *total += u64::from(level);
        }
        windows += 1;
    }
    debug!("Analysed {} windows of {} samples", windows, analyser.fft_size());

    let average_spectrum: Vec<u8> = totals
        .iter()
        .map(|&total| total.checked_div(windows).map_or(0, |avg| avg as u8))
        .collect();

    let dominant_bin = average_spectrum
        .iter()
        .enumerate()
        .fold((0, 0u8), |best, (i, &level)| if level > best.1 { (i, level) } else { best })
        .0;

    Ok(InspectReport {
        sample_rate: track.sample_rate(),
        frames: track.len(),
        duration_secs: track.duration().as_secs_f64(),
        peak,
        rms,
        dominant_bin,
        dominant_frequency_hz: dominant_bin as f64 * f64::from(track.sample_rate())
            / analyser.fft_size() as f64,
        average_spectrum,
    })
}
