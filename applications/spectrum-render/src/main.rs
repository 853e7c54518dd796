/// Soul Spectrum - headless spectrum renderer
use clap::{Parser, Subcommand};
use soul_spectrum::{inspect_file, render_file, SpectrumConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soul-spectrum")]
#[command(about = "Render an audio file's frequency spectrum to PNG frames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a file through the visualizer and write PNG frames
    Render {
        /// Audio file to render
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for PNG frames
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Simulated display refresh rate
        #[arg(long)]
        fps: Option<u32>,

        /// Stop after this many seconds of audio
        #[arg(long)]
        duration: Option<f64>,

        /// Write every N-th frame
        #[arg(long)]
        every: Option<u32>,
    },
    /// Print track level and spectrum summary
    Inspect {
        /// Audio file to inspect
        input: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soul_spectrum=info,soul_visualizer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            config,
            output,
            fps,
            duration,
            every,
        } => {
            let mut config = SpectrumConfig::load(config.as_deref())?;
            if let Some(output) = output {
                config.render.output_dir = output;
            }
            if let Some(fps) = fps {
                config.render.fps = fps;
            }
            if duration.is_some() {
                config.render.duration_secs = duration;
            }
            if let Some(every) = every {
                config.render.every = every;
            }

            let summary = render_file(&input, &config)?;
            println!(
                "{}: {} frames rendered, {} written to {}",
                summary.title,
                summary.frames_rendered,
                summary.written.len(),
                config.render.output_dir.display()
            );
        }
        Commands::Inspect {
            input,
            config,
            json,
        } => {
            let config = SpectrumConfig::load(config.as_deref())?;
            config.validate()?;
            let report = inspect_file(&input, &config)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Sample rate: {} Hz", report.sample_rate);
                println!("Duration:    {:.2} s", report.duration_secs);
                println!("Peak:        {:.3}", report.peak);
                println!("RMS:         {:.3}", report.rms);
                println!(
                    "Dominant:    {:.1} Hz (bin {})",
                    report.dominant_frequency_hz, report.dominant_bin
                );
            }
        }
    }

    Ok(())
}
