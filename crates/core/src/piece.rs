//! Piece module - a tetromino in play
//!
//! A `Piece` is plain data (kind, anchor, rotation state) plus the operations
//! that read or write the grid: obstruction checks, kicked rotation,
//! paint/unpaint, locking and T-spin corner checks.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::pieces::{
    get_kicks, get_shape, rotation_count, spawn_position, MinoOffset, PieceShape, T_CORNERS,
};
use crate::types::{PieceKind, SpinKind, Turn, VisualTag, TOPOUT_ROW};

/// A falling piece or its ghost projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    /// Anchor row; negative while above the top edge
    pub row: i8,
    /// Anchor column; may be negative when the shape's left columns are empty
    pub col: i8,
    pub rotation: u8,
    ghost: bool,
}

/// Result of locking a piece into the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockOutcome {
    /// Some cell locked above the top-out row
    pub topped_out: bool,
    /// Rows that became full, in the order they filled
    pub full_rows: ArrayVec<usize, 4>,
    /// Largest row index among the locked cells (0 if all were above the grid)
    pub lowest_row: usize,
}

impl Piece {
    /// Create a piece at its spawn anchor, rotation 0.
    pub fn new(kind: PieceKind) -> Self {
        let (row, col) = spawn_position(kind);
        Self {
            kind,
            row,
            col,
            rotation: 0,
            ghost: false,
        }
    }

    /// Ghost copy of `piece` at the same position.
    pub fn ghost_of(piece: &Piece) -> Self {
        Self {
            ghost: true,
            ..*piece
        }
    }

    pub fn is_ghost(&self) -> bool {
        self.ghost
    }

    pub fn tag(&self) -> VisualTag {
        if self.ghost {
            VisualTag::Ghost
        } else {
            VisualTag::Mino(self.kind)
        }
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    fn rotation_after(&self, delta: i8) -> u8 {
        let count = rotation_count(self.kind) as i16;
        (self.rotation as i16 + delta as i16).rem_euclid(count) as u8
    }

    /// Absolute `(row, col)` of the four cells.
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.shape()
            .map(|(dr, dc)| (self.row as i32 + dr as i32, self.col as i32 + dc as i32))
    }

    /// Whether the piece, rotated by `rotation_delta` and shifted by the
    /// offsets, would overlap a wall, the floor, or an occupied cell.
    pub fn is_obstructed(
        &self,
        grid: &Grid,
        rotation_delta: i8,
        row_offset: i8,
        col_offset: i8,
    ) -> bool {
        let shape = get_shape(self.kind, self.rotation_after(rotation_delta));
        shape.iter().any(|&(dr, dc)| {
            let row = self.row as i32 + row_offset as i32 + dr as i32;
            let col = self.col as i32 + col_offset as i32 + dc as i32;
            grid.is_blocked(row, col)
        })
    }

    /// Whether the piece cannot descend one more row.
    pub fn is_resting(&self, grid: &Grid) -> bool {
        self.is_obstructed(grid, 0, 1, 0)
    }

    /// Rows the piece can fall before it rests.
    pub fn drop_distance(&self, grid: &Grid) -> i8 {
        let mut distance = 0;
        while !self.is_obstructed(grid, 0, distance + 1, 0) {
            distance += 1;
        }
        distance
    }

    /// Rotate in place, falling back to the kick candidates in order.
    ///
    /// Returns the offset applied, `(0, 0)` for an in-place rotation, or
    /// `None` if every candidate is obstructed (the piece is unchanged).
    pub fn rotate(&mut self, grid: &Grid, turn: Turn) -> Option<MinoOffset> {
        let delta = turn.delta();
        let offset = if !self.is_obstructed(grid, delta, 0, 0) {
            (0, 0)
        } else {
            *get_kicks(self.kind, self.rotation, turn)
                .iter()
                .find(|&&(dr, dc)| !self.is_obstructed(grid, delta, dr, dc))?
        };

        self.row += offset.0;
        self.col += offset.1;
        self.rotation = self.rotation_after(delta);
        Some(offset)
    }

    /// Paint the piece's tag onto its cells.
    pub fn draw(&self, grid: &mut Grid) {
        let tag = self.tag();
        for (row, col) in self.cells() {
            grid.paint(row, col, tag);
        }
    }

    /// Remove the piece's tag from cells that still show it.
    pub fn erase(&self, grid: &mut Grid) {
        let tag = self.tag();
        for (row, col) in self.cells() {
            grid.unpaint(row, col, tag);
        }
    }

    /// Turn the piece's cells into permanent occupancy.
    pub fn lock(&self, grid: &mut Grid) -> LockOutcome {
        let tag = VisualTag::Mino(self.kind);
        let mut outcome = LockOutcome::default();
        for (row, col) in self.cells() {
            if row < TOPOUT_ROW {
                outcome.topped_out = true;
                continue;
            }
            outcome.lowest_row = outcome.lowest_row.max(row as usize);
            if grid.occupy(row, col, tag) && !outcome.full_rows.is_full() {
                outcome.full_rows.push(row as usize);
            }
        }
        outcome
    }

    /// Only the T piece takes part in spin detection.
    pub fn supports_spin_detection(&self) -> bool {
        self.kind == PieceKind::T
    }

    /// Classify the piece's corners at its current position.
    ///
    /// Full: both front corners blocked and at least one back corner.
    /// Mini: both back corners blocked and at least one front corner.
    pub fn corner_spin(&self, grid: &Grid) -> SpinKind {
        if !self.supports_spin_detection() {
            return SpinKind::None;
        }
        let corners = &T_CORNERS[self.rotation as usize % 4];
        let blocked = |&(dr, dc): &MinoOffset| {
            grid.is_blocked(self.row as i32 + dr as i32, self.col as i32 + dc as i32)
        };
        let front = corners[..2].iter().filter(|c| blocked(c)).count();
        let back = corners[2..].iter().filter(|c| blocked(c)).count();

        if front == 2 && back >= 1 {
            SpinKind::Full
        } else if back == 2 && front >= 1 {
            SpinKind::Mini
        } else {
            SpinKind::None
        }
    }

    /// Spin to score for a lock, given the offset of the last rotation.
    ///
    /// A spin only counts when that rotation needed a kick. A mini spin
    /// reached through a kick of Manhattan distance 3 or more counts as full.
    pub fn spin(&self, grid: &Grid, last_kick: Option<MinoOffset>) -> SpinKind {
        let Some((dr, dc)) = last_kick else {
            return SpinKind::None;
        };
        if (dr, dc) == (0, 0) {
            return SpinKind::None;
        }
        match self.corner_spin(grid) {
            SpinKind::Mini if dr.abs() + dc.abs() >= 3 => SpinKind::Full,
            other => other,
        }
    }
}
