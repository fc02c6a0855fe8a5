//! Arcade engine - discovery, scores and the orchestrator
//!
//! The orchestrator owns the active renderer and game handles and drives the
//! session: main loop, menu, end-of-game screen, renderer hot-swap with
//! rollback and fallback, and game switching.
//!
//! # Module Structure
//!
//! - [`config`]: [`EngineConfig`] and [`SwapTiming`], read from `ARCADE_*` variables
//! - [`registry`]: directory scan and keyword classification
//! - [`scores`]: the bounded high-score table
//! - [`clock`]: clamped frame delta-time
//! - [`orchestrator`]: the session state machine
//!
//! # Example
//!
//! ```no_run
//! use arcade_engine::{EngineConfig, Orchestrator};
//! use arcade_engine::loader::DynamicLoader;
//! use std::path::Path;
//!
//! let mut orchestrator = Orchestrator::new(DynamicLoader, EngineConfig::from_env());
//! orchestrator.start(Path::new("./lib/libarcade_color.so"), None)?;
//! orchestrator.run()?;
//! # Ok::<(), arcade_engine::EngineError>(())
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod scores;

pub use arcade_core as core;
pub use arcade_loader as loader;
pub use arcade_types as types;

pub use clock::FrameClock;
pub use config::{EngineConfig, ModuleCatalog, SwapTiming, WindowConfig};
pub use error::EngineError;
pub use orchestrator::{Flow, Orchestrator};
pub use registry::{cycle_index, DiscoveredModules, Direction, Registry};
pub use scores::{HighScoreEntry, HighScoreTable};
