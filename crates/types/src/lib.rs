//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! by the rules engine, the session controller and any presentation layer.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 23 (indexed 0-22, top to bottom)
//! - **Hidden rows**: the top 3 rows are a spawn buffer and are not drawn
//! - **Top-out row**: a locked cell above row 0 ends the game
//!
//! # Frame Timing
//!
//! All timing is counted in frames, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FPS` | 60.0988 | Frame rate of the frame loop |
//! | `DAS_FRAMES` | 14 | Held frames before a control auto-repeats |
//! | `AFTER_DAS_FRAMES` | 12 | Counter value after each repeat (repeat every 2 frames) |
//! | `LINE_CLEAR_DELAY_FRAMES` | 20 | Extra entry delay after a line clear |
//!
//! # Gravity
//!
//! Gravity `0..=29` selects the number of frames per automatic drop from
//! [`FRAMES_PER_TICK`]. The score multiplier for line clears is `gravity + 1`.
//!
//! # Examples
//!
//! ```
//! use stacker_types::{frames_per_tick, lines_for_level, Control, PieceKind, BOARD_COLS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Control::from_str("hardDrop"), Some(Control::HardDrop));
//! assert_eq!(frames_per_tick(0), 48);
//! assert_eq!(lines_for_level(0), 10);
//! assert_eq!(BOARD_COLS, 10);
//! ```

/// Number of rows in the grid, including the hidden spawn buffer.
pub const BOARD_ROWS: usize = 23;

/// Number of columns in the grid.
pub const BOARD_COLS: usize = 10;

/// Rows at the top of the grid that presentation layers keep hidden.
pub const HIDDEN_ROWS: usize = 3;

/// A locked cell with a row index below this value tops the board out.
pub const TOPOUT_ROW: i32 = 0;

/// Frame rate of the fixed-tick loop.
pub const FPS: f64 = 60.0988;

/// Held frames before a repeatable control fires again.
pub const DAS_FRAMES: u32 = 14;

/// Counter value a repeatable control is reset to after each auto-repeat.
pub const AFTER_DAS_FRAMES: u32 = 12;

/// Extra entry delay added when a lock cleared at least one row.
pub const LINE_CLEAR_DELAY_FRAMES: u32 = 20;

/// Minimum entry delay after a lock.
pub const ENTRY_DELAY_MIN_FRAMES: u32 = 10;

/// Highest selectable gravity.
pub const MAX_GRAVITY: u8 = 29;

/// Frames per automatic drop, indexed by gravity.
pub const FRAMES_PER_TICK: [u32; MAX_GRAVITY as usize + 1] = [
    48, 43, 38, 33, 28, 23, 18, 16, 15, 14, //
    13, 12, 11, 10, 9, 8, 7, 6, 5, 4, //
    4, 3, 3, 3, 2, 2, 2, 2, 2, 1,
];

/// Number of upcoming pieces shown in the lookahead window.
pub const QUEUE_LEN: usize = 5;

/// Number of entries kept in the recent-events feed.
pub const FEED_LEN: usize = 10;

/// Points for every lock.
pub const LAND_SCORE: u32 = 4;

/// Combo bonus per streak step (before the gravity multiplier).
pub const COMBO_BASE: u32 = 50;

/// Frames per automatic drop at the given gravity.
///
/// Gravity above [`MAX_GRAVITY`] is clamped.
pub fn frames_per_tick(gravity: u8) -> u32 {
    FRAMES_PER_TICK[gravity.min(MAX_GRAVITY) as usize]
}

/// Lines a marathon game must clear at `gravity` before it advances.
///
/// ```
/// use stacker_types::lines_for_level;
///
/// assert_eq!(lines_for_level(0), 10);
/// assert_eq!(lines_for_level(9), 100);
/// assert_eq!(lines_for_level(16), 110);
/// ```
pub fn lines_for_level(gravity: u8) -> i32 {
    let g = gravity as i32;
    (g * 10 + 10).min((g * 10 - 50).max(100))
}

/// Entry delay in frames after a piece locks with its lowest cell on `locked_row`.
///
/// Pieces that lock higher up the well get a longer pause.
pub fn entry_delay_frames(locked_row: usize, cleared: bool) -> u32 {
    let height = BOARD_ROWS.saturating_sub(locked_row) as u32;
    let base = if height <= 2 {
        ENTRY_DELAY_MIN_FRAMES
    } else {
        ENTRY_DELAY_MIN_FRAMES + height * 2
    };
    if cleared {
        base + LINE_CLEAR_DELAY_FRAMES
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_per_tick_table_is_monotonic() {
        for pair in FRAMES_PER_TICK.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert_eq!(frames_per_tick(0), 48);
        assert_eq!(frames_per_tick(MAX_GRAVITY), 1);
        assert_eq!(frames_per_tick(200), 1);
    }

    #[test]
    fn level_thresholds_follow_formula() {
        assert_eq!(lines_for_level(0), 10);
        assert_eq!(lines_for_level(5), 60);
        assert_eq!(lines_for_level(10), 100);
        assert_eq!(lines_for_level(15), 100);
        assert_eq!(lines_for_level(20), 150);
        assert_eq!(lines_for_level(29), 240);
    }

    #[test]
    fn entry_delay_depends_on_lock_height() {
        // Locked on the floor.
        assert_eq!(entry_delay_frames(22, false), 10);
        assert_eq!(entry_delay_frames(21, false), 10);
        // Three rows up the well.
        assert_eq!(entry_delay_frames(20, false), 16);
        assert_eq!(entry_delay_frames(20, true), 36);
        assert_eq!(entry_delay_frames(0, false), 56);
    }
}

/// The seven tetromino kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use stacker_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Stable index into per-kind tables.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Direction of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Clockwise (+1 rotation state)
    Right,
    /// Counter-clockwise (-1 rotation state)
    Left,
}

impl Turn {
    /// Signed rotation-state delta.
    pub fn delta(&self) -> i8 {
        match self {
            Turn::Right => 1,
            Turn::Left => -1,
        }
    }
}

/// Identity painted onto a grid cell for the presentation layer.
///
/// The rules never look at tags beyond identity checks when erasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualTag {
    Mino(PieceKind),
    Ghost,
}

impl VisualTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualTag::Mino(kind) => kind.as_str(),
            VisualTag::Ghost => "ghost",
        }
    }
}

/// Logical control symbols, pre-mapped from raw input by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    SoftDrop,
    HardDrop,
    Hold,
    Pause,
    Reset,
    Statistics,
    /// Switch between marathon and infinite mode
    Mode,
}

impl Control {
    /// Parse a control from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use stacker_types::Control;
    ///
    /// assert_eq!(Control::from_str("moveLeft"), Some(Control::MoveLeft));
    /// assert_eq!(Control::from_str("ROTATERIGHT"), Some(Control::RotateRight));
    /// assert_eq!(Control::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Control::MoveLeft),
            "moveright" => Some(Control::MoveRight),
            "rotateleft" => Some(Control::RotateLeft),
            "rotateright" => Some(Control::RotateRight),
            "softdrop" => Some(Control::SoftDrop),
            "harddrop" => Some(Control::HardDrop),
            "hold" => Some(Control::Hold),
            "pause" => Some(Control::Pause),
            "reset" => Some(Control::Reset),
            "statistics" => Some(Control::Statistics),
            "mode" => Some(Control::Mode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::MoveLeft => "moveLeft",
            Control::MoveRight => "moveRight",
            Control::RotateLeft => "rotateLeft",
            Control::RotateRight => "rotateRight",
            Control::SoftDrop => "softDrop",
            Control::HardDrop => "hardDrop",
            Control::Hold => "hold",
            Control::Pause => "pause",
            Control::Reset => "reset",
            Control::Statistics => "statistics",
            Control::Mode => "mode",
        }
    }

    /// Whether holding this control auto-repeats (DAS).
    pub fn repeats(&self) -> bool {
        matches!(
            self,
            Control::MoveLeft | Control::MoveRight | Control::SoftDrop
        )
    }
}

/// Game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Gravity rises as lines are cleared
    #[default]
    Marathon,
    /// Gravity stays where the player put it
    Infinite,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "marathon" => Some(GameMode::Marathon),
            "infinite" | "endless" => Some(GameMode::Infinite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Marathon => "MARATHON",
            GameMode::Infinite => "INFINITE",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            GameMode::Marathon => GameMode::Infinite,
            GameMode::Infinite => GameMode::Marathon,
        }
    }
}

/// Board lifecycle state.
///
/// `Playing <-> Paused` is reversible; `Dead` is left only through `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardState {
    Playing,
    Paused,
    Dead,
}

/// Spin classification of a locking T piece.
///
/// - **None**: not a spin
/// - **Mini**: both back corners blocked and at least one front corner
/// - **Full**: both front corners blocked and at least one back corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinKind {
    None,
    Mini,
    Full,
}

impl SpinKind {
    /// Returns `None` for `SpinKind::None`, `Some("mini")` or `Some("full")` otherwise.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            SpinKind::None => None,
            SpinKind::Mini => Some("mini"),
            SpinKind::Full => Some("full"),
        }
    }

    pub fn is_spin(&self) -> bool {
        !matches!(self, SpinKind::None)
    }
}

/// Highlight tier of a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    #[default]
    Plain,
    Silver,
    Gold,
    Aqua,
}
