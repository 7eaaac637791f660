//! Render-diff adapter between a [`Board`] and a [`Presenter`].
//!
//! Keeps a shadow copy of what was last pushed and forwards only the grid
//! cells and panel values that changed since.

use arrayvec::ArrayVec;

use crate::core::Board;
use crate::presenter::{LevelInfo, Presenter};
use crate::types::{BoardState, PieceKind, VisualTag, QUEUE_LEN};

#[derive(Debug, Clone, Default)]
pub struct SurfaceSync {
    /// Tags last painted, row-major; empty until the first flush
    cells: Vec<Option<VisualTag>>,
    score: Option<u64>,
    feed_revision: Option<u64>,
    level: Option<LevelInfo>,
    hold: Option<(Option<PieceKind>, bool)>,
    queue: Option<ArrayVec<PieceKind, QUEUE_LEN>>,
    state: Option<BoardState>,
    ghost: Option<bool>,
}

impl SurfaceSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything so the next flush pushes the full state.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Push changes since the last flush. Returns the number of cells painted.
    pub fn flush<P: Presenter + ?Sized>(&mut self, board: &Board, out: &mut P) -> usize {
        let grid = board.grid();
        let cols = grid.cols();
        let full = self.cells.len() != grid.cells().len();
        if full {
            self.cells = vec![None; grid.cells().len()];
        }

        let mut painted = 0;
        for (idx, cell) in grid.cells().iter().enumerate() {
            if full || self.cells[idx] != cell.tag {
                self.cells[idx] = cell.tag;
                out.paint(idx / cols, idx % cols, cell.tag);
                painted += 1;
            }
        }

        if update(&mut self.score, board.score()) {
            out.show_score(board.score());
        }
        let feed = board.scoring().feed();
        if update(&mut self.feed_revision, feed.revision()) {
            out.show_feed(feed.entries());
        }
        let level = LevelInfo {
            gravity: board.gravity(),
            left_lines: board.left_lines(),
            mode: board.mode(),
        };
        if update(&mut self.level, level) {
            out.show_level(level);
        }
        let available = !board.hold_used();
        if update(&mut self.hold, (board.held(), available)) {
            out.show_hold(board.held(), available);
        }
        let queue: ArrayVec<PieceKind, QUEUE_LEN> = board.queue().iter().copied().collect();
        if update(&mut self.queue, queue) {
            out.show_queue(board.queue());
        }
        if update(&mut self.state, board.state()) {
            out.show_state(board.state());
        }
        if update(&mut self.ghost, board.ghost_enabled()) {
            out.show_ghost(board.ghost_enabled());
        }

        painted
    }
}

/// Store `value` and report whether it differs from what was there.
fn update<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_reports_changes_only() {
        let mut slot = None;
        assert!(update(&mut slot, 3));
        assert!(!update(&mut slot, 3));
        assert!(update(&mut slot, 4));
    }
}
