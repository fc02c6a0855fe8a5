//! Orchestrator errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::ModuleError;
use crate::loader::LoadError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Opening, resolving or constructing a module failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A renderer never reported open within its poll budget.
    #[error("renderer {} did not open after {attempts} poll(s)", .path.display())]
    Init { path: PathBuf, attempts: u32 },

    /// A renderer opened, then stopped reporting open after its first frame.
    #[error("renderer {} closed after its first frame", .path.display())]
    Closed { path: PathBuf },

    /// A module returned an error from one of its operations.
    ///
    /// Only the rendered message is kept; the module may be unloaded before
    /// this error is reported.
    #[error("module {} failed: {message}", .path.display())]
    Runtime { path: PathBuf, message: String },

    /// Every renderer candidate failed to open.
    #[error("no usable renderer")]
    NoUsableRenderer,

    #[error("high-score file {}: {source}", .path.display())]
    Scores {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    /// Capture a module's error as host-owned text.
    ///
    /// Call while the module's handle is alive: `source` is rendered and
    /// dropped here.
    pub fn runtime(path: impl Into<PathBuf>, source: ModuleError) -> Self {
        EngineError::Runtime {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Whether the session cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::NoUsableRenderer)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
