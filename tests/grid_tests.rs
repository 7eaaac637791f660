//! Grid tests - occupancy counters and cascading row collapse

use stacker::core::Grid;
use stacker::types::{PieceKind, VisualTag, BOARD_COLS, BOARD_ROWS};

const BLOCK: VisualTag = VisualTag::Mino(PieceKind::Z);

fn fill_row(grid: &mut Grid, row: i32) -> bool {
    let mut full = false;
    for col in 0..BOARD_COLS as i32 {
        full = grid.occupy(row, col, BLOCK);
    }
    full
}

#[test]
fn test_new_grid_is_empty() {
    let grid = Grid::default();
    assert_eq!(grid.rows(), BOARD_ROWS);
    assert_eq!(grid.cols(), BOARD_COLS);
    assert_eq!(grid.occupied_count(), 0);
    for row in 0..BOARD_ROWS {
        assert_eq!(grid.blanks(row), BOARD_COLS);
        assert!(!grid.is_row_full(row));
    }
}

#[test]
fn test_walls_floor_and_sky() {
    let grid = Grid::default();
    assert!(grid.is_blocked(0, -1));
    assert!(grid.is_blocked(0, BOARD_COLS as i32));
    assert!(grid.is_blocked(BOARD_ROWS as i32, 0));
    // Above the top edge is open, but walls still apply.
    assert!(grid.is_open(-3, 0));
    assert!(grid.is_blocked(-3, -1));
}

#[test]
fn test_last_cell_reports_full_row() {
    let mut grid = Grid::default();
    for col in 0..BOARD_COLS as i32 - 1 {
        assert!(!grid.occupy(22, col, BLOCK));
    }
    assert_eq!(grid.blanks(22), 1);
    assert!(grid.occupy(22, BOARD_COLS as i32 - 1, BLOCK));
    assert!(grid.is_row_full(22));
    assert_eq!(grid.occupied_count(), BOARD_COLS);

    // Occupying again changes nothing.
    assert!(!grid.occupy(22, 0, BLOCK));
    assert_eq!(grid.occupied_count(), BOARD_COLS);
}

#[test]
fn test_collapse_cascades_in_ascending_order() {
    let mut grid = Grid::default();
    grid.occupy(18, 0, BLOCK);
    grid.occupy(19, 1, BLOCK);
    assert!(fill_row(&mut grid, 20));
    grid.occupy(21, 2, BLOCK);
    assert!(fill_row(&mut grid, 22));

    // Given out of order on purpose.
    grid.collapse_rows(&[22, 20]);

    assert_eq!(grid.occupied_count(), 3);
    assert!(grid.is_occupied(20, 0));
    assert!(grid.is_occupied(21, 1));
    assert!(grid.is_occupied(22, 2));
    assert_eq!(grid.blanks(22), BOARD_COLS - 1);
    assert_eq!(grid.blanks(21), BOARD_COLS - 1);
    assert_eq!(grid.blanks(20), BOARD_COLS - 1);
    assert_eq!(grid.blanks(19), BOARD_COLS);
    assert!(!grid.is_occupied(18, 0));
}

#[test]
fn test_collapse_moves_tags_with_cells() {
    let mut grid = Grid::default();
    grid.occupy(21, 4, VisualTag::Mino(PieceKind::T));
    fill_row(&mut grid, 22);
    grid.collapse_rows(&[22]);
    assert_eq!(grid.tag(22, 4), Some(VisualTag::Mino(PieceKind::T)));
    assert_eq!(grid.tag(21, 4), None);
    assert_eq!(grid.tag(0, 4), None);
}

#[test]
fn test_paint_never_touches_occupancy() {
    let mut grid = Grid::default();
    grid.paint(5, 5, VisualTag::Ghost);
    assert_eq!(grid.tag(5, 5), Some(VisualTag::Ghost));
    assert!(grid.is_open(5, 5));

    // A different tag is not removed.
    grid.unpaint(5, 5, VisualTag::Mino(PieceKind::I));
    assert_eq!(grid.tag(5, 5), Some(VisualTag::Ghost));
    grid.unpaint(5, 5, VisualTag::Ghost);
    assert_eq!(grid.tag(5, 5), None);

    // Locked cells keep their tag.
    grid.occupy(6, 5, BLOCK);
    grid.unpaint(6, 5, BLOCK);
    assert_eq!(grid.tag(6, 5), Some(BLOCK));
}
