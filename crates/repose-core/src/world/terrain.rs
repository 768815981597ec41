//! Terrain generation - static wall floors under the falling material

use std::fmt;
use std::str::FromStr;

use repose_simulation::Cell;
use serde::{Deserialize, Serialize};

use super::{Grid, SimRng};
use crate::error::ConfigError;

/// Shape of the static floor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorProfile {
    /// Straight line from `min` at the left edge to `max` at the right edge
    #[default]
    Slope,
    /// Constant height `min`
    Flat,
    /// Terraces stepping from `min` up to `max`
    Stepped,
    /// Independent uniform height per column in `[min, max]`
    Random,
}

impl FloorProfile {
    pub const ALL: [FloorProfile; 4] = [
        FloorProfile::Slope,
        FloorProfile::Flat,
        FloorProfile::Stepped,
        FloorProfile::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FloorProfile::Slope => "slope",
            FloorProfile::Flat => "flat",
            FloorProfile::Stepped => "stepped",
            FloorProfile::Random => "random",
        }
    }
}

impl fmt::Display for FloorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FloorProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FloorProfile::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownFloorProfile(s.to_string()))
    }
}

/// Terrain generator - stateless methods that rebuild a grid's floor
pub struct TerrainGenerator;

impl TerrainGenerator {
    /// Clamp floor bounds so `1 <= min <= max <= grid_height - 1`
    pub fn clamp_bounds(grid_height: usize, min_height: i32, max_height: i32) -> (i32, i32) {
        let top = grid_height as i32 - 1;
        let min = min_height.min(top).max(1);
        let max = max_height.min(top).max(min);
        (min, max)
    }

    /// Floor height of every column for `profile`, bounds already clamped
    pub fn column_heights<R: SimRng>(
        profile: FloorProfile,
        width: usize,
        min_height: i32,
        max_height: i32,
        rng: &mut R,
    ) -> Vec<i32> {
        if min_height == max_height {
            return vec![min_height; width];
        }

        let span = (max_height - min_height) as f64;
        match profile {
            FloorProfile::Flat => vec![min_height; width],
            FloorProfile::Slope => {
                let run = width.saturating_sub(1).max(1) as f64;
                (0..width)
                    .map(|x| {
                        let t = x as f64 / run;
                        (min_height as f64 + t * span).round() as i32
                    })
                    .collect()
            }
            FloorProfile::Stepped => {
                let steps = (width / 6).max(2);
                let repeats = width.div_ceil(steps);
                (0..width)
                    .map(|x| {
                        let step = x / repeats;
                        let t = step as f64 / (steps - 1) as f64;
                        (min_height as f64 + t * span).round() as i32
                    })
                    .collect()
            }
            FloorProfile::Random => {
                let choices = (max_height - min_height + 1) as usize;
                (0..width)
                    .map(|_| min_height + rng.gen_index(choices) as i32)
                    .collect()
            }
        }
    }

    /// Clear the whole grid and fill each column with walls from the bottom
    ///
    /// Returns the clamped `(min, max)` bounds actually used.
    pub fn build<R: SimRng>(
        grid: &mut Grid,
        profile: FloorProfile,
        min_height: i32,
        max_height: i32,
        rng: &mut R,
    ) -> (i32, i32) {
        let (min, max) = Self::clamp_bounds(grid.height(), min_height, max_height);
        if (min, max) != (min_height, max_height) {
            log::debug!(
                "Floor bounds ({}, {}) clamped to ({}, {})",
                min_height,
                max_height,
                min,
                max
            );
        }

        grid.clear();
        let heights = Self::column_heights(profile, grid.width(), min, max, rng);
        for (x, height) in heights.into_iter().enumerate() {
            let capped = height.clamp(0, grid.height() as i32) as usize;
            grid.fill_column(x, capped, Cell::Wall);
        }

        log::debug!(
            "Built {} floor {}..{} on {}x{} grid",
            profile,
            min,
            max,
            grid.width(),
            grid.height()
        );
        (min, max)
    }

    /// Wall height of column `x` (contiguous walls counted up from the bottom row)
    pub fn wall_height(grid: &Grid, x: usize) -> usize {
        (0..grid.height())
            .rev()
            .take_while(|&y| grid.cell_at(x, y).is_wall())
            .count()
    }
}
