//! Errors raised by module implementations.

use thiserror::Error;

/// Failure reported by a renderer or game module through its contract.
///
/// Every variant owns plain strings. A module's code is unmapped once its
/// library unloads, so nothing here may hold a trait object created inside
/// a module (an `io::Error`, a boxed error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    /// A resource the backend needs (terminal, display, window) is unavailable.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The module is in a state where the call makes no sense.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("{0}")]
    Other(String),
}

impl ModuleError {
    pub fn other(msg: impl Into<String>) -> Self {
        ModuleError::Other(msg.into())
    }
}

pub type ModuleResult<T> = std::result::Result<T, ModuleError>;
