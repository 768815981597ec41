//! Simulation - owns the grid and drives terrain, emitter, step engine and metrics

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use repose_simulation::{Cell, Material};
use serde::{Deserialize, Serialize};

use super::{
    CellularAutomataUpdater, Emitter, FloorProfile, Grid, GridPoint, MetricsAnalyzer, NoopStats,
    SimRng, SimStats, SimulationMetrics, SurfaceProfile, TerrainGenerator,
};
use crate::config::SimulationConfig;
use crate::error::ConfigError;

/// Full state dump for an external renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major occupancy, `width * height` entries
    pub cells: Vec<Cell>,
    pub metrics: SimulationMetrics,
}

/// Outcome of a settle pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleSummary {
    /// Ticks that changed state, settle-only ticks included
    pub ticks: usize,
    /// Ticks in which at least one grain fell, slid or spread
    pub moving_ticks: usize,
    /// A quiet tick was reached before the cap
    pub quiescent: bool,
}

/// Forwards events and remembers whether anything moved this tick
struct MoveTracker<'a> {
    inner: &'a mut dyn SimStats,
    moved: bool,
}

impl SimStats for MoveTracker<'_> {
    fn record_fall(&mut self) {
        self.moved = true;
        self.inner.record_fall();
    }

    fn record_slide(&mut self) {
        self.moved = true;
        self.inner.record_slide();
    }

    fn record_spread(&mut self) {
        self.moved = true;
        self.inner.record_spread();
    }

    fn record_settled(&mut self) {
        self.inner.record_settled();
    }
}

/// The granular heap engine
///
/// Single-threaded and synchronous: every operation runs to completion.
/// Callers sharing one engine across threads must serialize access themselves.
pub struct Simulation<R: SimRng = Xoshiro256StarStar> {
    grid: Grid,
    rng: R,

    /// Probability that an emitted grain is fine, always in `[0, 1]`
    mix_ratio: f32,

    /// Floor bounds as last built (after clamping)
    floor_min: i32,
    floor_max: i32,
    floor_profile: FloorProfile,

    /// Permutation of `0..width`, reshuffled every tick
    column_order: Vec<usize>,
}

impl Simulation<Xoshiro256StarStar> {
    /// Build an engine with the default RNG, seeded from `config.seed` or entropy
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(config, Xoshiro256StarStar::seed_from_u64(seed))
    }
}

impl<R: SimRng> Simulation<R> {
    /// Build an engine around an explicit RNG
    pub fn with_rng(config: &SimulationConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut sim = Self {
            grid: Grid::new(config.width, config.height),
            rng,
            mix_ratio: 0.0,
            floor_min: config.floor_min,
            floor_max: config.resolved_floor_max(),
            floor_profile: config.floor_profile,
            column_order: (0..config.width).collect(),
        };

        sim.set_mix_ratio(config.mix_ratio);
        if sim.mix_ratio != config.mix_ratio {
            log::warn!(
                "Mix ratio {} out of range, clamped to {}",
                config.mix_ratio,
                sim.mix_ratio
            );
        }
        sim.build_floor(config.floor_profile, config.floor_min, sim.floor_max);

        log::info!(
            "Simulation created: {}x{} grid, {} floor {}..{}, mix {:.2}",
            config.width,
            config.height,
            sim.floor_profile,
            sim.floor_min,
            sim.floor_max,
            sim.mix_ratio
        );
        Ok(sim)
    }

    // ===== Configuration =====

    /// Store `value` clamped into `[0, 1]`; NaN becomes 0
    pub fn set_mix_ratio(&mut self, value: f32) {
        self.mix_ratio = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }

    pub fn mix_ratio(&self) -> f32 {
        self.mix_ratio
    }

    pub fn floor_profile(&self) -> FloorProfile {
        self.floor_profile
    }

    /// Floor bounds as last built, after clamping
    pub fn floor_bounds(&self) -> (i32, i32) {
        (self.floor_min, self.floor_max)
    }

    // ===== Terrain =====

    /// Clear the grid and build a straight floor from `min_height` to `max_height`
    pub fn build_slope(&mut self, min_height: i32, max_height: i32) {
        self.build_floor(FloorProfile::Slope, min_height, max_height);
    }

    /// Clear the grid and build a floor of the given shape
    pub fn build_floor(&mut self, profile: FloorProfile, min_height: i32, max_height: i32) {
        let (min, max) =
            TerrainGenerator::build(&mut self.grid, profile, min_height, max_height, &mut self.rng);
        self.floor_min = min;
        self.floor_max = max;
        self.floor_profile = profile;
    }

    /// Rebuild the current floor, discarding all material and edits
    pub fn reset(&mut self) {
        self.build_floor(self.floor_profile, self.floor_min, self.floor_max);
    }

    /// Remove every fine/coarse grain, keeping walls
    pub fn reset_sand_only(&mut self) {
        let removed = self.grid.clear_materials();
        log::debug!("Cleared {} grains", removed);
    }

    // ===== Direct edit =====

    /// Overwrite a cell; out-of-bounds points are ignored
    pub fn set_cell(&mut self, point: GridPoint, cell: Cell) {
        self.grid.set_cell(point, cell);
    }

    /// Cell at `point`, `Empty` when out of bounds
    pub fn get_cell(&self, point: GridPoint) -> Cell {
        self.grid.get_cell(point)
    }

    // ===== Emitter =====

    /// Insert a grain at the top of `column` (clamped); `false` when the source is blocked
    pub fn emit_at(&mut self, column: i32, material: Option<Material>) -> bool {
        Emitter::emit_at(&mut self.grid, column, material, self.mix_ratio, &mut self.rng)
    }

    /// Insert a mix-ratio grain at the source column
    pub fn emit(&mut self) -> bool {
        self.emit_at(self.source_column() as i32, None)
    }

    pub fn source_column(&self) -> usize {
        Emitter::source_column(self.grid.width())
    }

    // ===== Step engine =====

    /// Advance one tick; `false` when nothing moved or settled
    pub fn step(&mut self) -> bool {
        self.step_with_stats(&mut NoopStats)
    }

    /// Advance one tick, reporting every move to `stats`
    pub fn step_with_stats(&mut self, stats: &mut dyn SimStats) -> bool {
        CellularAutomataUpdater::step(&mut self.grid, &mut self.column_order, &mut self.rng, stats)
    }

    /// Step until quiescent or `max_iterations` ticks have run
    ///
    /// Returns the number of ticks in which at least one grain moved. A tick
    /// that only locked grains in is not counted.
    pub fn settle(&mut self, max_iterations: usize) -> usize {
        self.settle_with_stats(max_iterations, &mut NoopStats).moving_ticks
    }

    pub fn settle_with_stats(
        &mut self,
        max_iterations: usize,
        stats: &mut dyn SimStats,
    ) -> SettleSummary {
        let mut summary = SettleSummary::default();
        while summary.ticks < max_iterations {
            let mut tracker = MoveTracker { inner: &mut *stats, moved: false };
            if !self.step_with_stats(&mut tracker) {
                summary.quiescent = true;
                log::debug!(
                    "Settled after {} ticks ({} moving)",
                    summary.ticks,
                    summary.moving_ticks
                );
                return summary;
            }
            summary.ticks += 1;
            if tracker.moved {
                summary.moving_ticks += 1;
            }
        }
        log::debug!("Settle cap of {} ticks reached", max_iterations);
        summary
    }

    // ===== Metrics =====

    pub fn metrics(&self) -> SimulationMetrics {
        MetricsAnalyzer::metrics(&self.grid, self.mix_ratio)
    }

    /// Angle of the static floor in degrees
    pub fn floor_angle(&self) -> f64 {
        MetricsAnalyzer::floor_angle(self.grid.width(), self.floor_min, self.floor_max)
    }

    pub fn surface_profile(&self) -> SurfaceProfile {
        MetricsAnalyzer::surface_profile(&self.grid)
    }

    pub fn heap_angle(&self) -> f64 {
        MetricsAnalyzer::heap_angle(&self.grid)
    }

    // ===== Read access =====

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Raw occupancy array, row-major
    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of fine/coarse grains on the grid
    pub fn particle_count(&self) -> usize {
        self.grid.count_materials()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width(),
            height: self.height(),
            cells: self.cells().to_vec(),
            metrics: self.metrics(),
        }
    }

}
