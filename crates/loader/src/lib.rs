//! Module loading - shared libraries in, trait objects out
//!
//! A [`ModuleHandle`] binds one loaded library to the single instance it
//! constructs. The handle is the only owner of both: callers borrow the
//! instance, and dropping the handle destroys the instance through the
//! library's own teardown entry point *before* the library is unloaded.
//!
//! # Loading Paths
//!
//! - [`DynamicLoader`]: `dlopen`/`LoadLibrary` via `libloading`, resolving
//!   the `arcade_create` / `arcade_destroy` entry points
//! - [`BuiltinLoader`]: in-process factories keyed by path, for statically
//!   linked modules and for tests
//!
//! Both implement [`ModuleLoader`], the seam the orchestrator is generic over.
//!
//! # Example
//!
//! ```no_run
//! use arcade_loader::{DynamicLoader, ModuleLoader};
//! use std::path::Path;
//!
//! let loader = DynamicLoader;
//! let mut handle = loader.load_renderer(Path::new("./lib/libarcade_color.so"))?;
//! let renderer = handle.instance()?;
//! renderer.init(800, 600, "Arcade").ok();
//! # Ok::<(), arcade_loader::LoadError>(())
//! ```

pub mod error;
pub mod handle;
pub mod loader;

pub use arcade_core as core;

pub use error::LoadError;
pub use handle::{Factory, ModuleHandle};
pub use loader::{BuiltinLoader, DynamicLoader, ModuleLoader};

/// Handle to a loaded renderer backend.
pub type RendererHandle = ModuleHandle<dyn core::Renderer>;

/// Handle to a loaded game module.
pub type GameHandle = ModuleHandle<dyn core::Game>;
