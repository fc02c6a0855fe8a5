//! Errors surfaced while loading a module.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Loader failures. None of them are retried internally.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The shared library could not be opened.
    #[error("cannot open module {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A required entry point is missing.
    #[error("module {} has no `{symbol}` entry point: {source}", .path.display())]
    MissingSymbol {
        path: PathBuf,
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// The factory produced no instance.
    #[error("module {} returned no instance", .path.display())]
    NullInstance { path: PathBuf },

    /// No in-process factory is registered for the path.
    #[error("no builtin module registered at {}", .path.display())]
    NotRegistered { path: PathBuf },
}

impl LoadError {
    /// Path of the module that failed.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Open { path, .. }
            | LoadError::MissingSymbol { path, .. }
            | LoadError::NullInstance { path }
            | LoadError::NotRegistered { path } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
