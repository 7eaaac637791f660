//! Terminal front end.
//!
//! The session pushes board changes into a [`TermSurface`]; a [`GameView`]
//! lays the surface out into a [`FrameBuffer`]; the [`TerminalRenderer`]
//! writes only the framebuffer cells that changed since the last draw.
//!
//! Board cells are drawn two columns wide to offset the usual glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod surface;

pub use stacker_core as core;
pub use stacker_engine as engine;
pub use stacker_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::TermSurface;
