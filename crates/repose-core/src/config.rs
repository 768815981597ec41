//! Simulation construction parameters

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::world::FloorProfile;

/// Parameters for building a [`Simulation`](crate::Simulation)
///
/// Every field has a default, so partial RON/JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Floor height (cells from the bottom) at the left edge
    pub floor_min: i32,
    /// Floor height at the right edge; derived from `floor_min` and `height` when unset
    pub floor_max: Option<i32>,
    /// Probability that an emitted grain is fine rather than coarse
    pub mix_ratio: f32,
    /// Terrain shape built at construction and on `reset`
    pub floor_profile: FloorProfile,
    /// RNG seed; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            floor_min: 4,
            floor_max: None,
            mix_ratio: 0.7,
            floor_profile: FloorProfile::Slope,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Reject dimensions that cannot hold a floor plus a row of falling space
    ///
    /// Floor bounds and mix ratio are never rejected; they are clamped when applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if self.height < 2 {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        let too_large = ConfigError::TooLarge {
            width: self.width,
            height: self.height,
        };
        let area = self.width.checked_mul(self.height).ok_or(too_large.clone())?;
        if i32::try_from(self.width).is_err()
            || i32::try_from(self.height).is_err()
            || isize::try_from(area).is_err()
        {
            return Err(too_large);
        }
        Ok(())
    }

    /// Right-edge floor height, `max(floor_min + 1, height / 2)` when not given
    pub fn resolved_floor_max(&self) -> i32 {
        self.floor_max
            .unwrap_or_else(|| self.floor_min.saturating_add(1).max(self.height as i32 / 2))
    }
}
