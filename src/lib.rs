//! Arcade (workspace facade crate).
//!
//! Re-exports the host crates under `crates/` and holds the command-line
//! front end shared by the `arcade` binary and its tests.

pub mod cli;

pub use arcade_core as core;
pub use arcade_engine as engine;
pub use arcade_loader as loader;
pub use arcade_types as types;
