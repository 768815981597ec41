use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use repose::{AppConfig, PixelRenderer, Runner};
use repose_core::FloorProfile;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frames to pour (one emit and one step each) [config default: 450]
    #[arg(long)]
    frames: Option<usize>,

    /// Step cap for settling after the pour [config default: 1000]
    #[arg(long)]
    settle: Option<usize>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Probability that an emitted grain is fine (0..1)
    #[arg(long)]
    mix: Option<f32>,

    /// Floor shape: slope, flat, stepped, random
    #[arg(long)]
    floor: Option<FloorProfile>,

    /// Floor height at the left edge
    #[arg(long, allow_negative_numbers = true)]
    floor_min: Option<i32>,

    /// Floor height at the right edge
    #[arg(long, allow_negative_numbers = true)]
    floor_max: Option<i32>,

    /// RNG seed (random when omitted; the chosen seed is reported)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the run report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the final grid as PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell for PNG output [config default: 4]
    #[arg(long)]
    scale: Option<u32>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    /// Command-line flags are the highest configuration layer
    fn apply(&self, config: &mut AppConfig) {
        let sim = &mut config.simulation;
        if let Some(width) = self.width {
            sim.width = width;
        }
        if let Some(height) = self.height {
            sim.height = height;
        }
        if let Some(mix) = self.mix {
            sim.mix_ratio = mix;
        }
        if let Some(floor) = self.floor {
            sim.floor_profile = floor;
        }
        if let Some(floor_min) = self.floor_min {
            sim.floor_min = floor_min;
        }
        if self.floor_max.is_some() {
            sim.floor_max = self.floor_max;
        }
        if self.seed.is_some() {
            sim.seed = self.seed;
        }

        let run = &mut config.run;
        if let Some(frames) = self.frames {
            run.frames = frames;
        }
        if let Some(settle) = self.settle {
            run.settle_iterations = settle;
        }
        if let Some(scale) = self.scale {
            run.png_scale = scale;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    args.apply(&mut config);

    // Handle --print-config flag
    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    let mut runner = Runner::new(&config).context("Invalid simulation configuration")?;
    let report = runner.run(&config);

    println!("{}", report.summary());
    println!("Seed: {}", report.seed);

    if let Some(path) = &args.json {
        report.save_json(path)?;
        log::info!("Report written to {}", path.display());
    }

    if let Some(path) = &args.png {
        let sim = runner.simulation();
        let scale = config.run.png_scale as usize;
        let mut renderer = PixelRenderer::new(sim.width(), sim.height(), scale);
        renderer.render_simulation(sim);
        renderer.save_png(path)?;
    }

    Ok(())
}
