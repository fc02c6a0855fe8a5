//! ModuleHandle: sole owner of a loaded library and its instance.

use std::fmt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::rc::Rc;

use libloading::Library;
use tracing::{debug, trace};

use crate::core::{Contract, CreateFn, DestroyFn, CREATE_SYMBOL, DESTROY_SYMBOL};
use crate::error::{LoadError, Result};

/// In-process constructor for builtin modules. `None` means construction failed.
pub type Factory<T> = Rc<dyn Fn() -> Option<Box<T>>>;

enum Source<T: ?Sized> {
    Library {
        // Keeps the entry points valid; released after the instance.
        _library: Library,
        create: CreateFn,
        destroy: DestroyFn,
    },
    Builtin(Factory<T>),
}

enum Instance<T: ?Sized> {
    /// Allocated inside the module; must go back through its `destroy`.
    Foreign {
        ptr: NonNull<Box<T>>,
        destroy: DestroyFn,
    },
    Builtin(Box<T>),
}

impl<T: ?Sized> Instance<T> {
    fn object(&mut self) -> &mut T {
        match self {
            // SAFETY: `ptr` came from the module's `arcade_create`, is non-null,
            // and stays valid until `destroy` runs in `ModuleHandle::drop`.
            // The returned borrow is tied to `&mut self`.
            Instance::Foreign { ptr, .. } => unsafe { &mut **ptr.as_ptr() },
            Instance::Builtin(object) => object.as_mut(),
        }
    }
}

/// Exclusive owner of one loaded module and at most one instance of `T`.
///
/// `T` is `dyn Renderer` or `dyn Game`. Handles move but never clone.
pub struct ModuleHandle<T: ?Sized + Contract> {
    path: PathBuf,
    instance: Option<Instance<T>>,
    source: Source<T>,
}

impl<T: ?Sized + Contract> ModuleHandle<T> {
    /// Open a shared library and resolve both entry points.
    ///
    /// Nothing is constructed yet; see [`instance`](Self::instance).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // SAFETY: loading runs the library's initializers. Module directories
        // hold build outputs of this workspace, which have none besides std's.
        let library = unsafe { Library::new(&path) }.map_err(|source| LoadError::Open {
            path: path.clone(),
            source,
        })?;
        let create = resolve::<CreateFn>(&library, &path, CREATE_SYMBOL)?;
        let destroy = resolve::<DestroyFn>(&library, &path, DESTROY_SYMBOL)?;

        debug!("opened {} module {}", T::KIND.as_str(), path.display());
        Ok(Self {
            path,
            instance: None,
            source: Source::Library {
                _library: library,
                create,
                destroy,
            },
        })
    }

    /// Wrap an in-process factory in a handle.
    pub fn builtin(path: impl Into<PathBuf>, factory: Factory<T>) -> Self {
        Self {
            path: path.into(),
            instance: None,
            source: Source::Builtin(factory),
        }
    }

    /// The module's instance, constructing it on first use.
    ///
    /// Later calls return the same instance without constructing again.
    pub fn instance(&mut self) -> Result<&mut T> {
        let instance = match self.instance.take() {
            Some(instance) => instance,
            None => self.construct()?,
        };
        Ok(self.instance.insert(instance).object())
    }

    /// The instance if it has already been constructed.
    pub fn get(&mut self) -> Option<&mut T> {
        self.instance.as_mut().map(Instance::object)
    }

    pub fn is_constructed(&self) -> bool {
        self.instance.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn construct(&self) -> Result<Instance<T>> {
        let instance = match &self.source {
            Source::Library {
                create, destroy, ..
            } => {
                // SAFETY: `create` was resolved from a library exporting it
                // through `export_renderer!`/`export_game!`, which returns
                // either null or a `*mut Box<T>` for the matching contract.
                let raw = unsafe { create() };
                let ptr = NonNull::new(raw.cast::<Box<T>>()).ok_or_else(|| {
                    LoadError::NullInstance {
                        path: self.path.clone(),
                    }
                })?;
                Instance::Foreign {
                    ptr,
                    destroy: *destroy,
                }
            }
            Source::Builtin(factory) => {
                Instance::Builtin(factory().ok_or_else(|| LoadError::NullInstance {
                    path: self.path.clone(),
                })?)
            }
        };
        trace!("constructed {} instance from {}", T::KIND.as_str(), self.path.display());
        Ok(instance)
    }
}

impl<T: ?Sized + Contract> Drop for ModuleHandle<T> {
    fn drop(&mut self) {
        // Instance first; the library in `source` is only released after
        // this body returns.
        match self.instance.take() {
            // SAFETY: `ptr` was produced by this library's `create` and has
            // not been destroyed; the library is still loaded.
            Some(Instance::Foreign { ptr, destroy }) => unsafe { destroy(ptr.as_ptr().cast()) },
            Some(Instance::Builtin(object)) => drop(object),
            None => {}
        }
        trace!("released {} module {}", T::KIND.as_str(), self.path.display());
    }
}

impl<T: ?Sized + Contract> fmt::Debug for ModuleHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("kind", &T::KIND)
            .field("path", &self.path)
            .field("builtin", &matches!(self.source, Source::Builtin(_)))
            .field("constructed", &self.is_constructed())
            .finish()
    }
}

fn resolve<F: Copy>(library: &Library, path: &Path, symbol: &'static str) -> Result<F> {
    // SAFETY: `F` is the exact signature the export macros generate for
    // `symbol`; the copied function pointer is only called while `library`
    // is kept alive by the owning handle.
    unsafe { library.get::<F>(symbol.as_bytes()) }
        .map(|sym| *sym)
        .map_err(|source| LoadError::MissingSymbol {
            path: path.to_path_buf(),
            symbol,
            source,
        })
}
