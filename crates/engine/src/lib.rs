//! Session layer - drives a [`Board`](stacker_core::Board) frame by frame
//!
//! - [`session`]: pressed-control set with auto-repeat, pause/focus/reset/mode handling
//! - [`presenter`]: traits a front end implements to receive board state
//! - [`sync`]: render-diff adapter that pushes only what changed
//! - [`pacer`]: converts wall-clock time into whole frames
//! - [`settings`]: session configuration from file, environment and flags
//!
//! Nothing here reads a clock. Hosts feed frames (or elapsed time through the
//! pacer), which keeps sessions deterministic under test.

pub mod pacer;
pub mod presenter;
pub mod session;
pub mod settings;
pub mod sync;

pub use stacker_core as core;
pub use stacker_types as types;

pub use pacer::FramePacer;
pub use presenter::{Headless, LevelInfo, Presenter, RenderSurface};
pub use session::Session;
pub use settings::SessionConfig;
pub use sync::SurfaceSync;
