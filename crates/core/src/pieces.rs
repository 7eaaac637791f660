//! Pieces module - tetromino shapes, kick candidates and spin corners
//!
//! All offsets are `(row, col)` with rows growing downwards, relative to the
//! piece anchor. Rotation states are numbered 0..count; the O piece has a
//! single state and no kicks.

use crate::types::{PieceKind, Turn};

/// Offset of a single mino (or a kick) relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece anchor
pub type PieceShape = [MinoOffset; 4];

/// Kick candidates indexed by `[from_rotation][direction]`, direction 0 = right
type KickTable = [[[MinoOffset; 4]; 2]; 4];

const I_SHAPES: [PieceShape; 4] = [
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (0, 2), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 0), (2, 1)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(0, 2), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (1, 2), (2, 0)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
];

const O_SHAPES: [PieceShape; 1] = [[(0, 0), (0, 1), (1, 0), (1, 1)]];

const S_SHAPES: [PieceShape; 4] = [
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 1), (1, 2), (2, 0), (2, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
];

const T_SHAPES: [PieceShape; 4] = [
    [(0, 1), (1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 1)],
    [(0, 1), (1, 0), (1, 1), (2, 1)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(0, 2), (1, 1), (1, 2), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(0, 1), (1, 0), (1, 1), (2, 0)],
];

/// All rotation states of a piece kind.
pub fn shapes(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::Z => &Z_SHAPES,
    }
}

/// Number of distinct rotation states (1 for O, 4 otherwise).
pub fn rotation_count(kind: PieceKind) -> u8 {
    shapes(kind).len() as u8
}

/// Get the shape for a piece kind and rotation state.
///
/// The rotation is taken modulo the kind's rotation count.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let table = shapes(kind);
    table[rotation as usize % table.len()]
}

const JLSTZ_KICKS: KickTable = [
    [
        [(0, -1), (-1, -1), (2, 0), (2, -1)],
        [(0, 1), (-1, 1), (2, 0), (2, 1)],
    ],
    [
        [(0, 1), (1, 1), (-2, 0), (-2, 1)],
        [(0, 1), (1, 1), (-2, 0), (-2, 1)],
    ],
    [
        [(0, 1), (-1, 1), (2, 0), (2, 1)],
        [(0, -1), (-1, -1), (2, 0), (2, -1)],
    ],
    [
        [(0, -1), (1, -1), (-2, 0), (-2, -1)],
        [(0, -1), (1, -1), (-2, 0), (-2, -1)],
    ],
];

const I_KICKS: KickTable = [
    [
        [(0, 1), (-1, 1), (2, 0), (2, 1)],
        [(0, -1), (0, 2), (-2, -1), (-1, 2)],
    ],
    [
        [(0, -1), (0, 2), (-2, -1), (1, 2)],
        [(0, 2), (0, -1), (-1, 2), (2, -1)],
    ],
    [
        [(0, 2), (0, -1), (-1, 2), (2, -1)],
        [(0, 1), (0, -2), (2, 1), (-1, -2)],
    ],
    [
        [(0, 1), (0, -2), (2, 1), (-1, -2)],
        [(0, -2), (0, 1), (1, -2), (-2, 1)],
    ],
];

/// Kick candidates tried, in order, after the in-place rotation fails.
pub fn get_kicks(kind: PieceKind, from: u8, turn: Turn) -> &'static [MinoOffset] {
    let table = match kind {
        PieceKind::O => return &[],
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    let dir = match turn {
        Turn::Right => 0,
        Turn::Left => 1,
    };
    &table[from as usize % 4][dir]
}

/// Spawn anchor `(row, col)` for a piece kind.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    match kind {
        PieceKind::O => (0, 4),
        _ => (0, 3),
    }
}

/// T-piece corner cells per rotation: two front corners, then two back.
pub const T_CORNERS: [[MinoOffset; 4]; 4] = [
    [(0, 0), (0, 2), (2, 2), (2, 0)],
    [(0, 2), (2, 2), (2, 0), (0, 0)],
    [(2, 2), (2, 0), (0, 0), (0, 2)],
    [(2, 0), (0, 0), (0, 2), (2, 2)],
];
