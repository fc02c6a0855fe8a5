//! Capability contracts shared by the host and every module
//!
//! A module is a shared library exposing one implementation of either
//! [`Renderer`] or [`Game`]. The host never links modules statically; it
//! resolves two entry points by name:
//!
//! - [`CREATE_SYMBOL`] (`arcade_create`): zero-argument factory returning a
//!   pointer to a boxed trait object, or null if construction failed
//! - [`DESTROY_SYMBOL`] (`arcade_destroy`): teardown taking that pointer back
//!
//! Modules never write these by hand; they invoke [`export_renderer!`] or
//! [`export_game!`] once at crate root.
//!
//! # ABI
//!
//! The pointer handed across the boundary is a thin `*mut Box<dyn Trait>`.
//! Trait-object layout is not a stable ABI, so modules must be built by the
//! same toolchain (and against the same version of this crate) as the host.
//! The workspace build guarantees that.
//!
//! # Module Structure
//!
//! - [`contract`]: the `Renderer` and `Game` traits
//! - [`error`]: [`ModuleError`], the error type modules report
//! - [`grid`]: headings, snake bodies and walls for grid games
//! - [`rng`]: a small seeded generator for game modules

pub mod contract;
pub mod error;
pub mod grid;
pub mod rng;

pub use arcade_types as types;

pub use contract::{Contract, Game, ModuleKind, Renderer};
pub use error::{ModuleError, ModuleResult};
pub use rng::SimpleRng;

/// Name of the factory entry point every module exports.
pub const CREATE_SYMBOL: &str = "arcade_create";

/// Name of the teardown entry point every module exports.
pub const DESTROY_SYMBOL: &str = "arcade_destroy";

/// Signature of [`CREATE_SYMBOL`].
pub type CreateFn = unsafe extern "C" fn() -> *mut std::ffi::c_void;

/// Signature of [`DESTROY_SYMBOL`].
pub type DestroyFn = unsafe extern "C" fn(*mut std::ffi::c_void);

/// Export a [`Renderer`] implementation from a `cdylib`.
///
/// The argument is an expression constructing the renderer; it is evaluated
/// on every `arcade_create` call.
///
/// ```ignore
/// arcade_core::export_renderer!(MyRenderer::new());
/// ```
#[macro_export]
macro_rules! export_renderer {
    ($ctor:expr) => {
        $crate::__export_module!(dyn $crate::Renderer, $ctor);
    };
}

/// Export a [`Game`] implementation from a `cdylib`.
///
/// ```ignore
/// arcade_core::export_game!(MyGame::default());
/// ```
#[macro_export]
macro_rules! export_game {
    ($ctor:expr) => {
        $crate::__export_module!(dyn $crate::Game, $ctor);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __export_module {
    ($object:ty, $ctor:expr) => {
        #[no_mangle]
        pub extern "C" fn arcade_create() -> *mut ::std::ffi::c_void {
            let instance: ::std::boxed::Box<$object> = ::std::boxed::Box::new($ctor);
            ::std::boxed::Box::into_raw(::std::boxed::Box::new(instance)).cast()
        }

        /// # Safety
        ///
        /// `instance` must be null or a pointer returned by `arcade_create`
        /// from this same library, not yet destroyed.
        #[no_mangle]
        pub unsafe extern "C" fn arcade_destroy(instance: *mut ::std::ffi::c_void) {
            if !instance.is_null() {
                drop(::std::boxed::Box::from_raw(
                    instance.cast::<::std::boxed::Box<$object>>(),
                ));
            }
        }
    };
}
