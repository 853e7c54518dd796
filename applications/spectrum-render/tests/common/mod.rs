/// Common test utilities and fixtures
use soul_spectrum::SpectrumConfig;
use std::f32::consts::PI;
use std::path::Path;
use std::sync::Once;

pub const SAMPLE_RATE: u32 = 8000;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Write a stereo 16-bit WAV holding a sine on both channels
pub fn write_sine_wav(path: &Path, frequency: f32, amplitude: f32, seconds: f32) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let frames = (SAMPLE_RATE as f32 * seconds) as usize;
    for n in 0..frames {
        let value = (2.0 * PI * frequency * n as f32 / SAMPLE_RATE as f32).sin() * amplitude;
        let sample = (value * f32::from(i16::MAX)) as i16;
        writer.write_sample(sample).unwrap();
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
}

/// Default config writing into `output`
pub fn config_for(output: &Path) -> SpectrumConfig {
    let mut config = SpectrumConfig::default();
    config.render.output_dir = output.to_path_buf();
    config
}
