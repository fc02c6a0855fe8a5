//! True-color terminal renderer module.
//!
//! Game cells are painted as colored blocks; text keeps its color.

use arcade_term::{Palette, TermBackend};

arcade_core::export_renderer!(TermBackend::new("Color terminal", Palette::TrueColor));
