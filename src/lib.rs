//! Stacker (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, tests and
//! benches can use `stacker::{core, engine, input, term, types}`.

pub use stacker_core as core;
pub use stacker_engine as engine;
pub use stacker_input as input;
pub use stacker_term as term;
pub use stacker_types as types;
