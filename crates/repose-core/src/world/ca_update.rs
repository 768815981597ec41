//! Cellular automata update logic - grain movement rules

use smallvec::SmallVec;

use super::{Grid, SimRng, SimStats};

/// Cellular automata updater - advances every mobile grain by at most one cell
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Run one tick over the whole grid
    ///
    /// Rows are visited from `height - 2` up to the top; within a row, columns
    /// follow `column_order`, which is reshuffled first. Returns `true` when any
    /// cell changed content or settled state.
    pub fn step<R: SimRng>(
        grid: &mut Grid,
        column_order: &mut [usize],
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> bool {
        debug_assert_eq!(column_order.len(), grid.width());

        // Destinations written this tick; never persisted across ticks
        let mut moved = vec![false; grid.len()];
        rng.shuffle(column_order);

        let mut changed = false;
        for y in (0..grid.height().saturating_sub(1)).rev() {
            for &x in column_order.iter() {
                changed |= Self::update_grain(grid, &mut moved, x, y, rng, stats);
            }
        }
        changed
    }

    /// Apply gravity, then diagonal slide, then lateral spread to one cell
    fn update_grain<R: SimRng>(
        grid: &mut Grid,
        moved: &mut [bool],
        x: usize,
        y: usize,
        rng: &mut R,
        stats: &mut dyn SimStats,
    ) -> bool {
        if moved[grid.index(x, y)] {
            return false;
        }
        let Some(material) = grid.cell_at(x, y).material() else {
            return false;
        };
        let flow = material.flow();
        let (cx, cy) = (x as i32, y as i32);

        // Gravity applies even to settled grains
        if grid.is_vacant(cx, cy + 1) {
            Self::move_grain(grid, moved, (x, y), (x, y + 1));
            stats.record_fall();
            return true;
        }

        // Locked in until moved or edited
        if grid.is_settled(x, y) {
            return false;
        }

        let diagonals = Self::vacant_among(grid, [(cx - 1, cy + 1), (cx + 1, cy + 1)]);
        let slide_to = match diagonals.len() {
            2 => Some(diagonals[rng.gen_index(2)]),
            1 if rng.check_probability(flow.diagonal) => Some(diagonals[0]),
            _ => None,
        };
        if let Some(target) = slide_to {
            Self::move_grain(grid, moved, (x, y), target);
            stats.record_slide();
            return true;
        }

        let laterals = Self::vacant_among(grid, [(cx - 1, cy), (cx + 1, cy)]);
        if !laterals.is_empty() && rng.check_probability(flow.lateral) {
            let target = laterals[rng.gen_index(laterals.len())];
            Self::move_grain(grid, moved, (x, y), target);
            stats.record_spread();
            return true;
        }

        let newly_settled = grid.mark_settled(x, y);
        if newly_settled {
            stats.record_settled();
        }
        newly_settled
    }

    /// In-bounds empty cells among `candidates`, order preserved
    fn vacant_among(grid: &Grid, candidates: [(i32, i32); 2]) -> SmallVec<[(usize, usize); 2]> {
        candidates
            .into_iter()
            .filter(|&(x, y)| grid.is_vacant(x, y))
            .map(|(x, y)| (x as usize, y as usize))
            .collect()
    }

    fn move_grain(grid: &mut Grid, moved: &mut [bool], from: (usize, usize), to: (usize, usize)) {
        grid.move_cell(from, to);
        moved[grid.index(to.0, to.1)] = true;
    }
}
