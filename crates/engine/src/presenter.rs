//! Collaborator traits for front ends.
//!
//! The session only pushes into these sinks; it never reads presentation
//! state back.

use crate::core::FeedEntry;
use crate::types::{BoardState, GameMode, PieceKind, VisualTag};

/// An addressable `rows x cols` grid of paintable cells.
pub trait RenderSurface {
    /// Show `tag` at `(row, col)`; `None` clears the cell.
    fn paint(&mut self, row: usize, col: usize, tag: Option<VisualTag>);
}

/// Level panel contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub gravity: u8,
    /// Lines to the next level; only meaningful in marathon mode
    pub left_lines: i32,
    pub mode: GameMode,
}

/// Push-only sinks for everything besides the grid.
///
/// Every method defaults to a no-op so a front end implements only what it shows.
pub trait Presenter: RenderSurface {
    fn show_score(&mut self, _score: u64) {}

    /// Newest entry first.
    fn show_feed(&mut self, _feed: &[FeedEntry]) {}

    fn show_level(&mut self, _level: LevelInfo) {}

    fn show_hold(&mut self, _held: Option<PieceKind>, _available: bool) {}

    fn show_queue(&mut self, _queue: &[PieceKind]) {}

    fn show_state(&mut self, _state: BoardState) {}

    fn show_ghost(&mut self, _enabled: bool) {}

    /// `Some(report)` opens the statistics view, `None` closes it.
    fn show_statistics(&mut self, _report: Option<&str>) {}
}

/// Presenter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl RenderSurface for Headless {
    fn paint(&mut self, _row: usize, _col: usize, _tag: Option<VisualTag>) {}
}

impl Presenter for Headless {}
