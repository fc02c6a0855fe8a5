//! Command-line arguments and their validation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::core::ModuleKind;
use crate::engine::{EngineConfig, Registry};

/// Exit code for invalid command-line input.
pub const EXIT_USAGE: u8 = 84;

/// Exit code for a session that failed at runtime (no usable renderer).
pub const EXIT_RUNTIME: u8 = 85;

/// Arcade host: load a renderer module and play game modules through it.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "arcade", version)]
pub struct Cli {
    /// Renderer module to start with (e.g. ./lib/libarcade_color.so)
    pub renderer: PathBuf,

    /// Game to start directly: a module path or part of its file name
    pub game: Option<String>,

    /// Directory scanned for modules [env: ARCADE_MODULE_DIR] [default: ./lib]
    #[arg(long, value_name = "DIR")]
    pub module_dir: Option<PathBuf>,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if let Some(dir) = &self.module_dir {
            config.module_dir = dir.clone();
        }
        config
    }
}

/// Why a renderer path given on the command line was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}: no such file", .0.display())]
    Missing(PathBuf),
    #[error("{}: not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("{}: not a renderer module", .0.display())]
    NotARenderer(PathBuf),
}

/// Check that `path` exists and is named like a renderer module.
pub fn validate_renderer(path: &Path, config: &EngineConfig) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::Missing(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }
    let registry = Registry::new(&config.module_dir, config.catalog.clone());
    match registry.classify(path) {
        Some(ModuleKind::Renderer) => Ok(()),
        _ => Err(ValidationError::NotARenderer(path.to_path_buf())),
    }
}

/// Listing of the modules found in the configured directory.
pub fn available_modules(config: &EngineConfig) -> String {
    let found = Registry::new(&config.module_dir, config.catalog.clone()).scan();
    let mut out = String::new();
    let _ = writeln!(out, "Available modules in {}:", config.module_dir.display());
    for (title, list) in [("Renderers", &found.renderers), ("Games", &found.games)] {
        let _ = writeln!(out, "  {title}:");
        if list.is_empty() {
            let _ = writeln!(out, "    (none)");
        }
        for path in list {
            let _ = writeln!(out, "    {}", path.display());
        }
    }
    out
}
