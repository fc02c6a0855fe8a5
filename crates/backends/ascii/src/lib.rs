//! Monochrome terminal renderer module.
//!
//! Works on terminals without color support: each game color is drawn as a
//! distinct glyph.

use arcade_term::{Palette, TermBackend};

arcade_core::export_renderer!(TermBackend::new("ASCII terminal", Palette::Ascii));
