//! Grid - bounded occupancy array with per-cell settled flags

use glam::IVec2;
use repose_simulation::Cell;

/// Grid coordinate: `x` is the column, `y` the row (0 = top)
pub type GridPoint = IVec2;

/// Fixed-size grid of cells
///
/// `cells` and `settled` are index-aligned (`index = y * width + x`) and only
/// ever mutated together, so every content change also clears the flag.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,

    /// Cell data, row-major order
    cells: Vec<Cell>,

    /// Lock-in flag per cell, meaningful only for material cells
    settled: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let area = width * height;
        Self {
            width,
            height,
            cells: vec![Cell::Empty; area],
            settled: vec![false; area],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at `point`, `Empty` when out of bounds
    pub fn get_cell(&self, point: GridPoint) -> Cell {
        if !self.in_bounds(point.x, point.y) {
            return Cell::Empty;
        }
        self.cell_at(point.x as usize, point.y as usize)
    }

    /// Overwrite the cell at `point` and clear its settled flag; out of bounds is a no-op
    pub fn set_cell(&mut self, point: GridPoint, cell: Cell) {
        if !self.in_bounds(point.x, point.y) {
            return;
        }
        self.put(point.x as usize, point.y as usize, cell);
    }

    /// Cell at in-bounds local coordinates
    #[inline]
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// True when `(x, y)` is in bounds and vacant
    #[inline]
    pub fn is_vacant(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cell_at(x as usize, y as usize).is_empty()
    }

    #[inline]
    pub fn is_settled(&self, x: usize, y: usize) -> bool {
        self.settled[self.index(x, y)]
    }

    /// Write a cell at in-bounds coordinates, clearing its settled flag
    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        self.settled[idx] = false;
    }

    /// Raise the settled flag, returning whether it was previously clear
    #[inline]
    pub(crate) fn mark_settled(&mut self, x: usize, y: usize) -> bool {
        let idx = self.index(x, y);
        !std::mem::replace(&mut self.settled[idx], true)
    }

    /// Move the content of `from` into `to`, leaving `from` empty
    ///
    /// Both cells change content, so both settled flags are cleared.
    #[inline]
    pub(crate) fn move_cell(&mut self, from: (usize, usize), to: (usize, usize)) {
        let cell = self.cell_at(from.0, from.1);
        self.put(to.0, to.1, cell);
        self.put(from.0, from.1, Cell::Empty);
    }

    /// Reset every cell to `Empty`
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.settled.fill(false);
    }

    /// Empty every fine/coarse cell, keeping walls; returns how many were removed
    pub fn clear_materials(&mut self) -> usize {
        let mut removed = 0;
        for (cell, settled) in self.cells.iter_mut().zip(self.settled.iter_mut()) {
            if cell.is_material() {
                *cell = Cell::Empty;
                *settled = false;
                removed += 1;
            }
        }
        removed
    }

    /// Fill column `x` with `cell` from the bottom row up to `fill_height` cells
    pub(crate) fn fill_column(&mut self, x: usize, fill_height: usize, cell: Cell) {
        let fill_height = fill_height.min(self.height);
        for y in (self.height - fill_height)..self.height {
            self.put(x, y, cell);
        }
    }

    /// Raw occupancy array, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Settled flags, index-aligned with [`Grid::cells`]
    pub fn settled_flags(&self) -> &[bool] {
        &self.settled
    }

    /// Count fine/coarse cells
    pub fn count_materials(&self) -> usize {
        self.cells.iter().filter(|c| c.is_material()).count()
    }

    /// Count cells holding exactly `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8, 5);
        assert_eq!(grid.len(), 40);
        assert_eq!(grid.cells().len(), grid.settled_flags().len());
        assert_eq!(grid.count(Cell::Empty), 40);
        assert!(grid.settled_flags().iter().all(|&s| !s));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(4, 4);
        grid.set_cell(IVec2::new(1, 2), Cell::Fine);
        assert_eq!(grid.get_cell(IVec2::new(1, 2)), Cell::Fine);
        assert_eq!(grid.cells()[2 * 4 + 1], Cell::Fine);
    }

    #[test]
    fn test_out_of_bounds_is_tolerated() {
        let mut grid = Grid::new(4, 3);
        let before = grid.cells().to_vec();

        for point in [
            IVec2::new(-1, 0),
            IVec2::new(0, -1),
            IVec2::new(4, 0),
            IVec2::new(0, 3),
            IVec2::new(i32::MAX, i32::MIN),
        ] {
            grid.set_cell(point, Cell::Wall);
            assert_eq!(grid.get_cell(point), Cell::Empty);
        }

        assert_eq!(grid.cells(), before.as_slice());
    }

    #[test]
    fn test_set_cell_clears_settled() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(IVec2::new(1, 1), Cell::Coarse);
        assert!(grid.mark_settled(1, 1));
        assert!(!grid.mark_settled(1, 1));
        assert!(grid.is_settled(1, 1));

        grid.set_cell(IVec2::new(1, 1), Cell::Coarse);
        assert!(!grid.is_settled(1, 1));
    }

    #[test]
    fn test_move_cell_clears_both_flags() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(IVec2::new(0, 0), Cell::Fine);
        grid.mark_settled(0, 0);

        grid.move_cell((0, 0), (0, 1));

        assert_eq!(grid.cell_at(0, 0), Cell::Empty);
        assert_eq!(grid.cell_at(0, 1), Cell::Fine);
        assert!(!grid.is_settled(0, 0));
        assert!(!grid.is_settled(0, 1));
    }

    #[test]
    fn test_is_vacant() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(IVec2::new(2, 2), Cell::Wall);
        assert!(grid.is_vacant(0, 0));
        assert!(!grid.is_vacant(2, 2));
        assert!(!grid.is_vacant(-1, 0));
        assert!(!grid.is_vacant(0, 3));
    }

    #[test]
    fn test_clear_materials_keeps_walls() {
        let mut grid = Grid::new(3, 3);
        grid.set_cell(IVec2::new(0, 2), Cell::Wall);
        grid.set_cell(IVec2::new(1, 1), Cell::Fine);
        grid.set_cell(IVec2::new(2, 1), Cell::Coarse);
        grid.mark_settled(2, 1);

        assert_eq!(grid.clear_materials(), 2);
        assert_eq!(grid.count_materials(), 0);
        assert_eq!(grid.get_cell(IVec2::new(0, 2)), Cell::Wall);
        assert!(!grid.is_settled(2, 1));
    }

    #[test]
    fn test_fill_column_from_bottom() {
        let mut grid = Grid::new(2, 5);
        grid.fill_column(1, 2, Cell::Wall);
        assert_eq!(grid.cell_at(1, 4), Cell::Wall);
        assert_eq!(grid.cell_at(1, 3), Cell::Wall);
        assert_eq!(grid.cell_at(1, 2), Cell::Empty);
        assert_eq!(grid.count(Cell::Wall), 2);

        // Over-tall fills are capped at the grid height
        grid.fill_column(0, 99, Cell::Wall);
        assert_eq!(grid.count(Cell::Wall), 7);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell(IVec2::new(0, 0), Cell::Wall);
        grid.set_cell(IVec2::new(1, 0), Cell::Fine);
        grid.mark_settled(1, 0);
        grid.clear();
        assert_eq!(grid.count(Cell::Empty), 4);
        assert!(grid.settled_flags().iter().all(|&s| !s));
    }
}
