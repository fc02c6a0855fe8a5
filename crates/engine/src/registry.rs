//! Module discovery.
//!
//! Walks the module directory, keeps files carrying the platform's shared
//! library extension, and sorts them into renderer and game buckets by
//! filename keyword. Both lists come back sorted by path text, so indices are
//! stable across runs as long as the directory contents are.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ModuleCatalog;
use crate::core::ModuleKind;

/// Result of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredModules {
    pub renderers: Vec<PathBuf>,
    pub games: Vec<PathBuf>,
}

impl DiscoveredModules {
    pub fn list(&self, kind: ModuleKind) -> &[PathBuf] {
        match kind {
            ModuleKind::Renderer => &self.renderers,
            ModuleKind::Game => &self.games,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty() && self.games.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
    catalog: ModuleCatalog,
}

impl Registry {
    pub fn new(root: impl Into<PathBuf>, catalog: ModuleCatalog) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// Classify a file by name. Renderer keywords win over game keywords.
    pub fn classify(&self, path: &Path) -> Option<ModuleKind> {
        let name = path.file_name()?.to_string_lossy();
        if self.catalog.renderers.iter().any(|k| name.contains(k.as_str())) {
            Some(ModuleKind::Renderer)
        } else if self.catalog.games.iter().any(|k| name.contains(k.as_str())) {
            Some(ModuleKind::Game)
        } else {
            None
        }
    }

    /// Scan the module directory. A missing directory yields empty lists.
    pub fn scan(&self) -> DiscoveredModules {
        let mut found = DiscoveredModules::default();

        if !self.root.is_dir() {
            warn!("module directory {} does not exist", self.root.display());
            return found;
        }

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_shared_library(path) {
                continue;
            }
            match self.classify(path) {
                Some(ModuleKind::Renderer) => found.renderers.push(path.to_path_buf()),
                Some(ModuleKind::Game) => found.games.push(path.to_path_buf()),
                None => debug!("ignoring unrecognised library {}", path.display()),
            }
        }

        sort_paths(&mut found.renderers);
        sort_paths(&mut found.games);

        debug!(
            "discovered {} renderer(s) and {} game(s) in {}",
            found.renderers.len(),
            found.games.len(),
            self.root.display()
        );
        found
    }
}

/// Direction of a cyclic move through a module list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// `(current + direction + count) mod count`, or `None` for an empty list.
pub fn cycle_index(current: usize, direction: Direction, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let current = current % count;
    Some(match direction {
        Direction::Next => (current + 1) % count,
        Direction::Prev => (current + count - 1) % count,
    })
}

/// Lexicographic order on the path text.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
}

fn is_shared_library(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(std::env::consts::DLL_EXTENSION))
}

/// Whether two paths name the same module file.
///
/// Compares canonical forms when both exist on disk, raw paths otherwise.
pub fn same_module(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
