use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wavefield::{ConfigError, WaveApp, WaveParams};

/// Grid side length used when neither a preset nor `--width` is given.
const START_SIZE: u32 = 100;
const START_SPREAD: f32 = 5.0;
const START_FREQUENCY: f32 = 0.1;
const START_AMPLITUDE: f32 = 5.5;

#[derive(Parser, Debug)]
#[command(name = "wavefield", about = "Interactive 3D particle wave field")]
struct Cli {
    /// Points along X [default: 100]
    #[arg(long)]
    width: Option<u32>,

    /// Points along Z [default: same as --width]
    #[arg(long)]
    height: Option<u32>,

    /// Distance between neighbouring points [default: 5]
    #[arg(long)]
    spread: Option<f32>,

    /// Wave frequency [default: 0.1]
    #[arg(long = "freq")]
    frequency: Option<f32>,

    /// Wave amplitude [default: 5.5]
    #[arg(long = "amp")]
    amplitude: Option<f32>,

    /// Pointer repulsion radius [default: 10]
    #[arg(long)]
    radius: Option<f32>,

    /// Pointer repulsion strength [default: 1]
    #[arg(long)]
    strength: Option<f32>,

    /// JSON parameter preset; flags given on the command line override it
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    window_width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 720)]
    window_height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Resolve the starting parameters: preset (or built-in start), then flags.
    fn params(&self) -> Result<WaveParams, ConfigError> {
        let mut params = match &self.preset {
            Some(path) => WaveParams::load(path)?,
            None => WaveParams::new(START_SIZE, START_SIZE, START_SPREAD)
                .with_wave(START_FREQUENCY, START_AMPLITUDE),
        };

        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height.or(self.width) {
            params.height = height;
        }
        if let Some(spread) = self.spread {
            params.spread = spread;
        }
        if let Some(frequency) = self.frequency {
            params.frequency = frequency;
        }
        if let Some(amplitude) = self.amplitude {
            params.amplitude = amplitude;
        }
        if let Some(radius) = self.radius {
            params.radius = radius;
        }
        if let Some(strength) = self.strength {
            params.strength = strength;
        }
        Ok(params)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "wavefield=debug"
    } else {
        "wavefield=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = cli.params().context("failed to load parameters")?;
    tracing::debug!(?params, "resolved parameters");

    WaveApp::new(params)
        .with_window_size(cli.window_width, cli.window_height)
        .run()?;

    Ok(())
}
