//! Terminal renderer backends.
//!
//! Everything both terminal modules share: a character framebuffer, a
//! diffing flush to the real terminal, and [`TermBackend`], the
//! [`Renderer`](crate::core::Renderer) implementation parameterized by a
//! [`Palette`].
//!
//! Window-space coordinates (default 800x600) are scaled to the terminal's
//! cell grid. Game grid cells are drawn two characters wide so squares look
//! square.

pub mod backend;
pub mod fb;
pub mod flush;
pub mod palette;

pub use arcade_core as core;
pub use arcade_types as types;

pub use backend::TermBackend;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use flush::{encode_diff_into, encode_full_into, TerminalSurface};
pub use palette::Palette;
