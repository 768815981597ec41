//! Emitter - inserts grains at the top boundary

use repose_simulation::{Cell, Material};

use super::{Grid, SimRng};

/// Source of new grains; stateless, the caller owns the mix ratio and RNG
pub struct Emitter;

impl Emitter {
    /// Fixed source column, `floor(width / 2)`
    #[inline]
    pub fn source_column(width: usize) -> usize {
        width / 2
    }

    /// Pick fine with probability `mix_ratio`, otherwise coarse
    pub fn choose_material<R: SimRng>(mix_ratio: f32, rng: &mut R) -> Material {
        if rng.check_probability(mix_ratio) {
            Material::Fine
        } else {
            Material::Coarse
        }
    }

    /// Insert a grain into the top row at `column` (clamped to the grid)
    ///
    /// Returns `false` without touching the grid when the target cell is occupied.
    /// Without an explicit material the RNG is consulted only after the target is
    /// known to be free.
    pub fn emit_at<R: SimRng>(
        grid: &mut Grid,
        column: i32,
        material: Option<Material>,
        mix_ratio: f32,
        rng: &mut R,
    ) -> bool {
        let x = column.clamp(0, grid.width() as i32 - 1) as usize;
        if !grid.cell_at(x, 0).is_empty() {
            return false;
        }
        let material = material.unwrap_or_else(|| Self::choose_material(mix_ratio, rng));
        grid.put(x, 0, Cell::from(material));
        true
    }
}
