//! Run results and reporting

use std::path::Path;

use anyhow::{Context, Result};
use repose_core::{FloorProfile, MoveCounts, SimulationMetrics};
use serde::{Deserialize, Serialize};

/// Report from one headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seed the engine RNG was built from
    pub seed: u64,

    pub width: usize,
    pub height: usize,

    pub floor_profile: FloorProfile,
    /// Floor bounds after clamping
    pub floor_min: i32,
    pub floor_max: i32,

    /// Pouring frames executed
    pub frames: usize,

    /// Grains inserted at the source
    pub emitted: usize,

    /// Frames whose emit found the source occupied
    pub blocked_emits: usize,

    /// Ticks of the settle pass in which a grain still moved
    pub settle_ticks: usize,

    /// Whether the settle pass reached a quiet tick before its cap
    pub quiescent: bool,

    /// Grains on the grid at the end of the run
    pub particle_count: usize,

    /// Angle of the static floor (degrees)
    pub floor_angle: f64,

    /// Heap metrics after settling
    pub metrics: SimulationMetrics,

    /// Step engine events over pouring and settling
    pub moves: MoveCounts,
}

impl RunReport {
    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Mix ratio: {:.2}", self.metrics.mix_ratio),
            format!("Top height: {}", self.metrics.top_height),
            format!("Bottom height: {}", self.metrics.bottom_height),
            format!("Delta H: {}", self.metrics.delta_h),
            format!("Heap angle: {:.2} deg", self.metrics.heap_angle),
            format!(
                "Floor angle: {:.2} deg ({} {}..{})",
                self.floor_angle, self.floor_profile, self.floor_min, self.floor_max
            ),
            format!(
                "Particles: {} ({} emitted, {} blocked)",
                self.particle_count, self.emitted, self.blocked_emits
            ),
            self.moves.summary(),
        ];
        if !self.quiescent {
            lines.push(format!(
                "Settle cap reached after {} moving ticks",
                self.settle_ticks
            ));
        }
        lines.join("\n")
    }

    /// Save report to JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize run report to JSON")?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write run report: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Load report from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read report file: {}", path.as_ref().display()))?;

        let report = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON report: {}", path.as_ref().display()))?;

        Ok(report)
    }
}
