//! Driver configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `repose.ron` file (if exists)
//! 3. Environment variables prefixed with `REPOSE_`
//! 4. Command-line flags (applied by the binary)
//!
//! Example environment variable: `REPOSE_SIMULATION__MIX_RATIO=0.3`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use repose_core::SimulationConfig;
use serde::{Deserialize, Serialize};

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "repose.ron";

/// Main driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Headless run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to pour; each frame emits once and steps once
    pub frames: usize,
    /// Step cap for the settle pass after pouring
    pub settle_iterations: usize,
    /// Pixels per cell in PNG output
    pub png_scale: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 450,
            settle_iterations: 1000,
            png_scale: 4,
        }
    }
}

impl AppConfig {
    /// Load configuration with layered sources from the working directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration using `path` as the (optional) config file layer
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_layers(path, None)
    }

    /// `env` replaces the process environment when given
    fn load_layers(path: &Path, env: Option<config::Map<String, String>>) -> Result<Self> {
        let defaults = AppConfig::default();
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("simulation.width", defaults.simulation.width as i64)?
            .set_default("simulation.height", defaults.simulation.height as i64)?
            .set_default("simulation.floor_min", defaults.simulation.floor_min as i64)?
            .set_default("simulation.mix_ratio", defaults.simulation.mix_ratio as f64)?
            .set_default(
                "simulation.floor_profile",
                defaults.simulation.floor_profile.name(),
            )?
            .set_default("run.frames", defaults.run.frames as i64)?
            .set_default("run.settle_iterations", defaults.run.settle_iterations as i64)?
            .set_default("run.png_scale", defaults.run.png_scale as i64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(&path.to_string_lossy())
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (REPOSE_SIMULATION__WIDTH, etc.)
            .add_source(
                Environment::with_prefix("REPOSE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render as RON, the format of the config file
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration to RON")
    }
}
