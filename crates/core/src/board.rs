//! Board module - the rules engine for one game
//!
//! The board owns the grid, the falling piece and its ghost, the hold slot,
//! the piece queue and the score state. It is driven one frame at a time by
//! [`Board::animate`]; gameplay commands (move, rotate, drops, hold) are
//! applied directly and either fully apply or leave the board unchanged.
//!
//! Timing is counted in frames. `left_frames` counts down to the next tick;
//! a lock adds an entry delay that is folded in on the following reload.

use tracing::{debug, info, warn};

use crate::grid::Grid;
use crate::piece::Piece;
use crate::pieces::MinoOffset;
use crate::rng::PieceQueue;
use crate::scoring::{LockScoring, ScoreEntry, ScoreState};
use crate::stats::Statistics;
use crate::types::{
    entry_delay_frames, frames_per_tick, lines_for_level, BoardState, GameMode, PieceKind,
    SpinKind, Turn, MAX_GRAVITY,
};

/// Summary of the most recent lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub cleared: u8,
    pub spin: SpinKind,
    pub topped_out: bool,
    pub perfect_clear: bool,
    /// Points added by the lock itself (hard drop points not included)
    pub score_delta: u64,
    /// Gravity changed as part of this lock
    pub leveled_up: bool,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    SpawnObstructed,
    ToppedOut,
    HoldObstructed,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::SpawnObstructed => "spawn obstructed",
            DeathCause::ToppedOut => "topped out",
            DeathCause::HoldObstructed => "hold obstructed",
        }
    }
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    falling: Option<Piece>,
    ghost: Option<Piece>,
    held: Option<PieceKind>,
    hold_used: bool,
    queue: PieceQueue,
    scoring: ScoreState,
    state: BoardState,
    mode: GameMode,
    gravity: u8,
    ghost_enabled: bool,
    frames_per_tick: u32,
    /// Frames until the next tick; may go negative within a frame
    left_frames: i32,
    /// Entry delay added at the next reload
    extra_frames: u32,
    /// Lines until the next level (marathon)
    left_lines: i32,
    /// Offset of the last successful rotation, forgotten by any other motion
    last_kick: Option<MinoOffset>,
    last_event: Option<LockEvent>,
    death: Option<DeathCause>,
}

impl Board {
    /// Create a board with default settings (gravity 0, ghost on, marathon).
    pub fn new(seed: u32) -> Self {
        let mut board = Self {
            grid: Grid::default(),
            falling: None,
            ghost: None,
            held: None,
            hold_used: false,
            queue: PieceQueue::new(seed),
            scoring: ScoreState::new(),
            state: BoardState::Playing,
            mode: GameMode::default(),
            gravity: 0,
            ghost_enabled: true,
            frames_per_tick: frames_per_tick(0),
            left_frames: 0,
            extra_frames: 0,
            left_lines: lines_for_level(0),
            last_kick: None,
            last_event: None,
            death: None,
        };
        board.init();
        board
    }

    /// Start a fresh game in place.
    ///
    /// A dead board becomes playing; a paused board stays paused.
    pub fn init(&mut self) {
        self.falling = None;
        self.ghost = None;
        if self.state == BoardState::Dead {
            self.state = BoardState::Playing;
        }
        self.grid.clear();
        self.left_frames = 0;
        self.extra_frames = 0;
        self.left_lines = lines_for_level(self.gravity);
        self.queue.init();
        self.held = None;
        self.hold_used = false;
        self.last_kick = None;
        self.last_event = None;
        self.death = None;
        self.scoring.reset();
        info!(gravity = self.gravity, mode = self.mode.as_str(), "board initialised");
    }

    /// Reconfigure gravity, ghost and mode.
    ///
    /// Gravity outside `0..=MAX_GRAVITY` is rejected (returns false) and the
    /// prior gravity kept; ghost and mode still apply.
    pub fn config(&mut self, gravity: Option<u8>, ghost: bool, mode: Option<GameMode>) -> bool {
        let mut accepted = true;
        if let Some(gravity) = gravity {
            if gravity <= MAX_GRAVITY {
                if gravity != self.gravity {
                    info!(from = self.gravity, to = gravity, "gravity changed");
                }
                self.set_gravity(gravity);
            } else {
                warn!(gravity, max = MAX_GRAVITY, "gravity out of range, ignored");
                accepted = false;
            }
        }
        if let Some(mode) = mode {
            if mode != self.mode {
                info!(mode = mode.as_str(), "mode changed");
            }
            self.mode = mode;
        }
        self.ghost_enabled = ghost;
        self.update_ghost();
        accepted
    }

    fn set_gravity(&mut self, gravity: u8) {
        self.gravity = gravity;
        self.frames_per_tick = frames_per_tick(gravity);
    }

    /// Advance one frame. Does nothing unless playing.
    pub fn animate(&mut self) {
        if self.state != BoardState::Playing {
            return;
        }
        self.left_frames -= 1;
        if self.left_frames <= 0 {
            self.tick();
            self.left_frames += self.frames_per_tick as i32;
            self.left_frames += self.extra_frames as i32;
            self.extra_frames = 0;
        }
    }

    /// One gravity step: drop (or land) the falling piece, then spawn if
    /// nothing is falling.
    pub fn tick(&mut self) {
        if let Some(piece) = self.falling {
            if piece.is_resting(&self.grid) {
                self.land();
            } else {
                self.shift_falling(1, 0);
                self.last_kick = None;
            }
        }
        if self.falling.is_none() && self.state != BoardState::Dead {
            self.spawn();
        }
    }

    fn spawn(&mut self) -> bool {
        let kind = self.queue.shift();
        self.place(kind, DeathCause::SpawnObstructed)
    }

    /// Put a new piece of `kind` at its spawn anchor as the falling piece.
    fn place(&mut self, kind: PieceKind, cause: DeathCause) -> bool {
        self.last_kick = None;
        let piece = Piece::new(kind);
        if piece.is_obstructed(&self.grid, 0, 0, 0) {
            self.die(cause);
            return false;
        }
        self.falling = Some(piece);
        self.update_ghost();
        true
    }

    /// Replace the falling piece with a fresh `kind` at its spawn anchor.
    ///
    /// Bypasses the queue; meant for fixtures and tooling. Returns false (and
    /// ends the game) if the anchor is obstructed.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        if let Some(piece) = self.falling.take() {
            piece.erase(&mut self.grid);
        }
        self.place(kind, DeathCause::SpawnObstructed)
    }

    fn die(&mut self, cause: DeathCause) {
        self.remove_ghost();
        self.falling = None;
        self.state = BoardState::Dead;
        self.death = Some(cause);
        info!(cause = cause.as_str(), score = self.scoring.score(), "game over");
    }

    /// Lock the falling piece and run clears, leveling and scoring.
    fn land(&mut self) {
        let Some(piece) = self.falling.take() else {
            return;
        };
        let spin = piece.spin(&self.grid, self.last_kick);
        self.remove_ghost();

        let outcome = piece.lock(&mut self.grid);
        self.grid.collapse_rows(&outcome.full_rows);
        let cleared = outcome.full_rows.len();

        self.hold_used = false;
        self.last_kick = None;
        self.extra_frames += entry_delay_frames(outcome.lowest_row, cleared > 0);

        let mut leveled_up = false;
        if self.mode == GameMode::Marathon {
            self.left_lines -= cleared as i32;
            if self.left_lines <= 0 && self.gravity < MAX_GRAVITY {
                self.set_gravity(self.gravity + 1);
                self.left_lines += lines_for_level(self.gravity);
                leveled_up = true;
                info!(gravity = self.gravity, left_lines = self.left_lines, "level up");
            }
        }

        let occupied_after = self.grid.occupied_count();
        let score_delta = self.scoring.score_lock(LockScoring {
            cleared,
            spin,
            occupied_after,
            gravity: self.gravity,
        });

        debug!(
            kind = piece.kind.as_str(),
            cleared,
            spin = spin.as_str().unwrap_or("none"),
            score_delta,
            "piece locked"
        );

        self.last_event = Some(LockEvent {
            cleared: cleared as u8,
            spin,
            topped_out: outcome.topped_out,
            perfect_clear: cleared > 0 && occupied_after == 0,
            score_delta,
            leveled_up,
        });

        if outcome.topped_out {
            self.die(DeathCause::ToppedOut);
        }
    }

    /// Erase, offset and redraw the falling piece (and keep the ghost painted).
    fn shift_falling(&mut self, rows: i8, cols: i8) {
        let Some(mut piece) = self.falling else {
            return;
        };
        piece.erase(&mut self.grid);
        piece.row += rows;
        piece.col += cols;
        self.falling = Some(piece);
        self.redraw();
    }

    fn redraw(&mut self) {
        if let Some(ghost) = self.ghost {
            ghost.draw(&mut self.grid);
        }
        if let Some(piece) = self.falling {
            piece.draw(&mut self.grid);
        }
    }

    fn remove_ghost(&mut self) {
        if let Some(ghost) = self.ghost.take() {
            ghost.erase(&mut self.grid);
        }
    }

    /// Recompute the ghost projection under the falling piece.
    fn update_ghost(&mut self) {
        self.remove_ghost();
        if self.ghost_enabled {
            if let Some(piece) = self.falling {
                let mut ghost = Piece::ghost_of(&piece);
                ghost.row += piece.drop_distance(&self.grid);
                self.ghost = Some(ghost);
            }
        }
        self.redraw();
    }

    /// Give a grounded piece a full tick before it locks.
    fn lockdown_reprieve(&mut self) {
        let grounded = self.falling.is_some_and(|p| p.is_resting(&self.grid));
        if grounded && self.left_frames < self.frames_per_tick as i32 {
            self.left_frames = self.frames_per_tick as i32;
        }
    }

    /// Move the falling piece `delta` columns. Returns true if it moved.
    pub fn move_by(&mut self, delta: i8) -> bool {
        let Some(piece) = self.falling else {
            return false;
        };
        if piece.is_obstructed(&self.grid, 0, 0, delta) {
            return false;
        }
        piece.erase(&mut self.grid);
        let mut moved = piece;
        moved.col += delta;
        self.falling = Some(moved);
        self.last_kick = None;
        self.update_ghost();
        self.lockdown_reprieve();
        true
    }

    /// Rotate the falling piece, trying kicks in order. Returns true on success.
    pub fn rotate(&mut self, turn: Turn) -> bool {
        let Some(mut piece) = self.falling else {
            return false;
        };
        let before = piece;
        let Some(offset) = piece.rotate(&self.grid, turn) else {
            return false;
        };
        before.erase(&mut self.grid);
        self.falling = Some(piece);
        self.last_kick = Some(offset);
        self.update_ghost();
        self.lockdown_reprieve();
        true
    }

    /// Descend one row if possible and restart the tick countdown. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        let Some(piece) = self.falling else {
            return false;
        };
        if piece.is_resting(&self.grid) {
            return false;
        }
        self.shift_falling(1, 0);
        self.left_frames = self.frames_per_tick as i32;
        self.last_kick = None;
        true
    }

    /// Drop to rest and lock immediately. Returns the rows descended.
    pub fn hard_drop(&mut self) -> Option<u32> {
        let piece = self.falling?;
        let height = piece.drop_distance(&self.grid);
        if height > 0 {
            self.shift_falling(height, 0);
            self.scoring.add(ScoreEntry::drop(height as u32));
            self.last_kick = None;
        }
        self.left_frames = 0;
        self.land();
        Some(height as u32)
    }

    /// Swap the falling piece with the hold slot, once per lock.
    pub fn hold(&mut self) -> bool {
        if self.hold_used {
            return false;
        }
        let Some(current) = self.falling.take() else {
            return false;
        };
        current.erase(&mut self.grid);
        self.remove_ghost();
        self.hold_used = true;

        match self.held.replace(current.kind) {
            Some(kind) => {
                self.left_frames = self.frames_per_tick as i32;
                self.place(kind, DeathCause::HoldObstructed);
            }
            None => {
                self.left_frames = 0;
                self.last_kick = None;
            }
        }
        debug!(held = current.kind.as_str(), "hold");
        true
    }

    /// Playing and paused swap; a dead board is left alone.
    pub fn toggle_pause(&mut self) -> BoardState {
        self.state = match self.state {
            BoardState::Playing => BoardState::Paused,
            BoardState::Paused => BoardState::Playing,
            BoardState::Dead => BoardState::Dead,
        };
        self.state
    }

    /// Take the summary of the last lock, if any since the previous call.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for fixtures and tools.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn falling(&self) -> Option<&Piece> {
        self.falling.as_ref()
    }

    pub fn ghost(&self) -> Option<&Piece> {
        self.ghost.as_ref()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// Upcoming pieces, front first.
    pub fn queue(&self) -> &[PieceKind] {
        self.queue.peek()
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn gravity(&self) -> u8 {
        self.gravity
    }

    pub fn ghost_enabled(&self) -> bool {
        self.ghost_enabled
    }

    pub fn frames_per_tick(&self) -> u32 {
        self.frames_per_tick
    }

    pub fn left_frames(&self) -> i32 {
        self.left_frames
    }

    pub fn pending_delay(&self) -> u32 {
        self.extra_frames
    }

    pub fn left_lines(&self) -> i32 {
        self.left_lines
    }

    pub fn last_kick(&self) -> Option<MinoOffset> {
        self.last_kick
    }

    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    pub fn scoring(&self) -> &ScoreState {
        &self.scoring
    }

    pub fn statistics(&self) -> &Statistics {
        self.scoring.statistics()
    }
}
