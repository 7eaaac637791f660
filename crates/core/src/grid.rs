//! Grid module - cell occupancy, per-row blank counters and row collapse
//!
//! The grid is `rows x cols` with row 0 at the top. Storage is a flat row-major
//! array, and every row keeps a count of its unoccupied cells so a row is full
//! exactly when its counter reaches zero.
//!
//! Each cell also remembers the visual tag last painted onto it. Pieces paint
//! and unpaint tags while falling; only locking changes occupancy.

use crate::types::{VisualTag, BOARD_COLS, BOARD_ROWS};

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub occupied: bool,
    pub tag: Option<VisualTag>,
}

/// The playfield grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
    /// Unoccupied cells remaining in each row
    blanks: Vec<usize>,
    /// Occupied cells on the whole grid
    occupied: usize,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
            blanks: vec![cols; rows],
            occupied: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        Some((row as usize) * self.cols + (col as usize))
    }

    /// Get the cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Whether a piece cell may sit at `(row, col)`.
    ///
    /// Rows above the top edge are always open so pieces can spawn partly
    /// off-screen. Columns outside the walls and rows below the floor are not.
    pub fn is_open(&self, row: i32, col: i32) -> bool {
        if col < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return false;
        }
        if row < 0 {
            return true;
        }
        !self.cells[(row as usize) * self.cols + col as usize].occupied
    }

    /// Whether `(row, col)` is a wall, the floor, or an occupied cell.
    pub fn is_blocked(&self, row: i32, col: i32) -> bool {
        !self.is_open(row, col)
    }

    /// Whether `(row, col)` is inside the grid and occupied.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell { occupied: true, .. }))
    }

    /// Unoccupied cells left in `row`.
    pub fn blanks(&self, row: usize) -> usize {
        self.blanks.get(row).copied().unwrap_or(0)
    }

    /// A row is full exactly when its blank counter is zero.
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.rows && self.blanks[row] == 0
    }

    /// Occupied cells on the whole grid; zero means the grid is empty.
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn tag(&self, row: i32, col: i32) -> Option<VisualTag> {
        self.get(row, col).and_then(|cell| cell.tag)
    }

    /// Paint a visual tag. Cells off the grid are ignored.
    pub fn paint(&mut self, row: i32, col: i32, tag: VisualTag) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx].tag = Some(tag);
        }
    }

    /// Remove `tag` from an unoccupied cell if it is the tag currently shown.
    pub fn unpaint(&mut self, row: i32, col: i32, tag: VisualTag) {
        if let Some(idx) = self.index(row, col) {
            let cell = &mut self.cells[idx];
            if !cell.occupied && cell.tag == Some(tag) {
                cell.tag = None;
            }
        }
    }

    /// Mark a cell occupied and decrement its row's blank counter.
    ///
    /// Returns true if this made the row full. Cells off the grid or already
    /// occupied leave the counters alone.
    pub fn occupy(&mut self, row: i32, col: i32, tag: VisualTag) -> bool {
        let Some(idx) = self.index(row, col) else {
            return false;
        };
        let cell = &mut self.cells[idx];
        cell.tag = Some(tag);
        if cell.occupied {
            return false;
        }
        cell.occupied = true;
        self.occupied += 1;

        let blanks = &mut self.blanks[row as usize];
        *blanks -= 1;
        *blanks == 0
    }

    /// Remove full rows one at a time, top to bottom.
    ///
    /// Each removal shifts every row above it down by one, so clearing rows
    /// `r1 < r2` moves rows above `r1` down by two. Rows are processed in
    /// ascending order so earlier removals never move a later target.
    pub fn collapse_rows(&mut self, rows: &[usize]) {
        let mut sorted: arrayvec::ArrayVec<usize, 4> = rows
            .iter()
            .copied()
            .filter(|&r| r < self.rows)
            .take(4)
            .collect();
        sorted.sort_unstable();
        for row in sorted {
            self.collapse_row(row);
        }
    }

    fn collapse_row(&mut self, row: usize) {
        let width = self.cols;
        let removed = width - self.blanks[row];
        self.occupied -= removed;

        // copy_within handles the overlapping ranges
        for r in (1..=row).rev() {
            let src = (r - 1) * width;
            self.cells.copy_within(src..src + width, r * width);
            self.blanks[r] = self.blanks[r - 1];
        }

        self.cells[0..width].fill(Cell::default());
        self.blanks[0] = width;
    }

    /// Cells of one row.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell and counter.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.blanks.fill(self.cols);
        self.occupied = 0;
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    const TAG: VisualTag = VisualTag::Mino(PieceKind::L);

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::default();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 9), Some(9));
        assert_eq!(grid.index(1, 0), Some(10));
        assert_eq!(grid.index(22, 9), Some(229));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(0, 10), None);
        assert_eq!(grid.index(23, 0), None);
    }

    #[test]
    fn test_open_above_top_only() {
        let grid = Grid::default();
        assert!(grid.is_open(-3, 4));
        assert!(!grid.is_open(-3, -1));
        assert!(!grid.is_open(-3, 10));
        assert!(!grid.is_open(23, 4));
    }

    #[test]
    fn test_occupy_tracks_blanks() {
        let mut grid = Grid::default();
        for col in 0..9 {
            assert!(!grid.occupy(22, col, TAG));
        }
        assert_eq!(grid.blanks(22), 1);
        assert!(grid.occupy(22, 9, TAG));
        assert!(grid.is_row_full(22));

        // Occupying twice does not double count.
        assert!(!grid.occupy(22, 9, TAG));
        assert_eq!(grid.blanks(22), 0);
        assert_eq!(grid.occupied_count(), 10);
    }

    #[test]
    fn test_collapse_top_row() {
        let mut grid = Grid::default();
        for col in 0..10 {
            grid.occupy(0, col, TAG);
        }
        grid.collapse_rows(&[0]);
        assert_eq!(grid.blanks(0), 10);
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.row(0).iter().all(|c| *c == Cell::default()));
    }

    #[test]
    fn test_unpaint_requires_matching_tag() {
        let mut grid = Grid::default();
        grid.paint(5, 5, VisualTag::Ghost);
        grid.unpaint(5, 5, TAG);
        assert_eq!(grid.tag(5, 5), Some(VisualTag::Ghost));
        grid.unpaint(5, 5, VisualTag::Ghost);
        assert_eq!(grid.tag(5, 5), None);

        // Locked cells keep their tag.
        grid.occupy(6, 6, TAG);
        grid.unpaint(6, 6, TAG);
        assert_eq!(grid.tag(6, 6), Some(TAG));
    }
}
