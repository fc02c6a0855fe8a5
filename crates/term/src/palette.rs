//! How a backend turns arcade colors into terminal cells.

use crate::fb::{CellStyle, Rgb};
use crate::types::Color;

/// Rendering style of a terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// 24-bit color: filled cells use the background color, text keeps its color.
    TrueColor,
    /// Monochrome glyphs: the color picks a character, everything is drawn white on black.
    Ascii,
}

const MONO_FG: Rgb = Rgb::new(230, 230, 230);

impl Palette {
    /// Glyph and style for one filled cell of `color`.
    pub fn fill(self, color: Color) -> (char, CellStyle) {
        match self {
            Palette::TrueColor => (' ', CellStyle::bg(Rgb::from(color))),
            Palette::Ascii => (glyph_for(color), CellStyle::fg(MONO_FG)),
        }
    }

    /// Foreground used for text drawn in `color`.
    pub fn text(self, color: Color) -> Rgb {
        match self {
            Palette::TrueColor => Rgb::from(color),
            Palette::Ascii => MONO_FG,
        }
    }

    /// Whether text drawn over a filled area should be bold.
    pub fn bold_text(self) -> bool {
        matches!(self, Palette::Ascii)
    }
}

/// Pick a glyph by dominant hue, so distinct game colors stay distinguishable
/// without color support.
fn glyph_for(color: Color) -> char {
    let rgb = Rgb::from(color);
    if rgb.luma() < 24 {
        return ' ';
    }
    let (r, g, b) = (i32::from(rgb.r), i32::from(rgb.g), i32::from(rgb.b));
    let spread = r.max(g).max(b) - r.min(g).min(b);
    if spread < 32 {
        // Greyscale.
        return if rgb.luma() > 160 { '#' } else { '+' };
    }
    if r > 96 && g > 96 && b < r / 2 {
        '*'
    } else if g >= r && g >= b {
        'o'
    } else if r >= g && r >= b {
        '@'
    } else {
        '%'
    }
}
