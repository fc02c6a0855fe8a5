//! Loaders: turn a module path into a handle.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::{Game, Renderer};
use crate::error::{LoadError, Result};
use crate::handle::{Factory, ModuleHandle};

/// Source of module handles for the orchestrator.
pub trait ModuleLoader {
    fn load_renderer(&self, path: &Path) -> Result<ModuleHandle<dyn Renderer>>;

    fn load_game(&self, path: &Path) -> Result<ModuleHandle<dyn Game>>;
}

/// Loads modules from shared libraries on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicLoader;

impl ModuleLoader for DynamicLoader {
    fn load_renderer(&self, path: &Path) -> Result<ModuleHandle<dyn Renderer>> {
        ModuleHandle::open(path)
    }

    fn load_game(&self, path: &Path) -> Result<ModuleHandle<dyn Game>> {
        ModuleHandle::open(path)
    }
}

/// Loads modules from factories registered in-process.
///
/// Paths are only keys here; nothing is read from disk.
#[derive(Default)]
pub struct BuiltinLoader {
    renderers: HashMap<PathBuf, Factory<dyn Renderer>>,
    games: HashMap<PathBuf, Factory<dyn Game>>,
}

impl BuiltinLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_renderer<F>(&mut self, path: impl Into<PathBuf>, factory: F)
    where
        F: Fn() -> Option<Box<dyn Renderer>> + 'static,
    {
        self.renderers.insert(path.into(), Rc::new(factory));
    }

    pub fn register_game<F>(&mut self, path: impl Into<PathBuf>, factory: F)
    where
        F: Fn() -> Option<Box<dyn Game>> + 'static,
    {
        self.games.insert(path.into(), Rc::new(factory));
    }

    pub fn with_renderer<F>(mut self, path: impl Into<PathBuf>, factory: F) -> Self
    where
        F: Fn() -> Option<Box<dyn Renderer>> + 'static,
    {
        self.register_renderer(path, factory);
        self
    }

    pub fn with_game<F>(mut self, path: impl Into<PathBuf>, factory: F) -> Self
    where
        F: Fn() -> Option<Box<dyn Game>> + 'static,
    {
        self.register_game(path, factory);
        self
    }
}

impl ModuleLoader for BuiltinLoader {
    fn load_renderer(&self, path: &Path) -> Result<ModuleHandle<dyn Renderer>> {
        self.renderers
            .get(path)
            .map(|factory| ModuleHandle::builtin(path, factory.clone()))
            .ok_or_else(|| LoadError::NotRegistered {
                path: path.to_path_buf(),
            })
    }

    fn load_game(&self, path: &Path) -> Result<ModuleHandle<dyn Game>> {
        self.games
            .get(path)
            .map(|factory| ModuleHandle::builtin(path, factory.clone()))
            .ok_or_else(|| LoadError::NotRegistered {
                path: path.to_path_buf(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_path_is_reported() {
        let loader = BuiltinLoader::new();
        let err = loader.load_game(Path::new("lib/libarcade_snake.so")).unwrap_err();
        assert!(matches!(err, LoadError::NotRegistered { .. }));
    }

    #[test]
    fn each_load_gets_a_fresh_handle() {
        let loader = BuiltinLoader::new().with_game("snake", || None);
        let a = loader.load_game(Path::new("snake")).unwrap();
        let b = loader.load_game(Path::new("snake")).unwrap();
        assert_eq!(a.path(), b.path());
        assert!(!a.is_constructed());
        assert!(!b.is_constructed());
    }

    #[test]
    fn dynamic_loader_surfaces_open_errors() {
        let err = DynamicLoader
            .load_renderer(Path::new("/nonexistent/libarcade_ascii.so"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert_eq!(err.path(), Path::new("/nonexistent/libarcade_ascii.so"));
    }
}
