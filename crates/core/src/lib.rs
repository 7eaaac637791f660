//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game: the grid and its row counters,
//! piece shapes and kicks, the bag randomizer, scoring and statistics, and the
//! [`Board`] engine that ties them together. It has no dependency on terminal
//! I/O; the only side channel is `tracing` events.
//!
//! # Module Structure
//!
//! - [`grid`]: 23x10 cell grid with per-row blank counters and cascading row collapse
//! - [`pieces`]: shape, kick and spin-corner tables
//! - [`piece`]: a piece in play (obstruction, kicked rotation, paint, lock, spin detection)
//! - [`rng`]: bag randomizer and lookahead queue
//! - [`scoring`]: score entries, the feed and the per-lock pipeline
//! - [`stats`]: per-game statistics and report
//! - [`board`]: the engine (frames, ticks, landing, hold, ghost, leveling)
//!
//! # Example
//!
//! ```
//! use stacker_core::Board;
//! use stacker_types::{BoardState, Turn};
//!
//! let mut board = Board::new(12345);
//! board.animate(); // first frame spawns a piece
//!
//! board.move_by(1);
//! board.rotate(Turn::Right);
//! board.hard_drop();
//!
//! assert_eq!(board.state(), BoardState::Playing);
//! assert!(board.score() >= 4); // every lock scores at least the land bonus
//! ```

pub mod board;
pub mod grid;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod stats;

pub use stacker_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, DeathCause, LockEvent};
pub use grid::{Cell, Grid};
pub use piece::{LockOutcome, Piece};
pub use pieces::{get_kicks, get_shape, MinoOffset, PieceShape};
pub use rng::{Bag, PieceQueue, SimpleRng};
pub use scoring::{Feed, FeedEntry, LockScoring, ScoreEntry, ScoreKind, ScoreState};
pub use stats::Statistics;
