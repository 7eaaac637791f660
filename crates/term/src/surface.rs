//! Terminal-side copy of everything the session presents.

use arrayvec::ArrayVec;

use crate::core::FeedEntry;
use crate::engine::{LevelInfo, Presenter, RenderSurface};
use crate::types::{
    BoardState, GameMode, PieceKind, VisualTag, BOARD_COLS, BOARD_ROWS, QUEUE_LEN,
};

/// Receives pushes from the session and remembers them for [`GameView`].
///
/// [`GameView`]: crate::game_view::GameView
#[derive(Debug, Clone)]
pub struct TermSurface {
    rows: usize,
    cols: usize,
    cells: Vec<Option<VisualTag>>,
    pub(crate) score: u64,
    pub(crate) feed: Vec<FeedEntry>,
    pub(crate) level: LevelInfo,
    pub(crate) held: Option<PieceKind>,
    pub(crate) hold_available: bool,
    pub(crate) queue: ArrayVec<PieceKind, QUEUE_LEN>,
    pub(crate) state: BoardState,
    pub(crate) ghost: bool,
    pub(crate) statistics: Option<String>,
    /// Something changed since the last [`take_dirty`](Self::take_dirty)
    dirty: bool,
}

impl Default for TermSurface {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLS)
    }
}

impl TermSurface {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            score: 0,
            feed: Vec::new(),
            level: LevelInfo {
                gravity: 0,
                left_lines: 0,
                mode: GameMode::Marathon,
            },
            held: None,
            hold_available: true,
            queue: ArrayVec::new(),
            state: BoardState::Playing,
            ghost: true,
            statistics: None,
            dirty: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tag(&self, row: usize, col: usize) -> Option<VisualTag> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn statistics(&self) -> Option<&str> {
        self.statistics.as_deref()
    }

    /// Return and clear the change flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Flag a redraw without any state change (e.g. terminal resize).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl RenderSurface for TermSurface {
    fn paint(&mut self, row: usize, col: usize, tag: Option<VisualTag>) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = tag;
            self.dirty = true;
        }
    }
}

impl Presenter for TermSurface {
    fn show_score(&mut self, score: u64) {
        self.score = score;
        self.dirty = true;
    }

    fn show_feed(&mut self, feed: &[FeedEntry]) {
        self.feed.clear();
        self.feed.extend_from_slice(feed);
        self.dirty = true;
    }

    fn show_level(&mut self, level: LevelInfo) {
        self.level = level;
        self.dirty = true;
    }

    fn show_hold(&mut self, held: Option<PieceKind>, available: bool) {
        self.held = held;
        self.hold_available = available;
        self.dirty = true;
    }

    fn show_queue(&mut self, queue: &[PieceKind]) {
        self.queue = queue.iter().copied().take(QUEUE_LEN).collect();
        self.dirty = true;
    }

    fn show_state(&mut self, state: BoardState) {
        self.state = state;
        self.dirty = true;
    }

    fn show_ghost(&mut self, enabled: bool) {
        self.ghost = enabled;
        self.dirty = true;
    }

    fn show_statistics(&mut self, report: Option<&str>) {
        self.statistics = report.map(str::to_owned);
        self.dirty = true;
    }
}
