//! TermBackend: the [`Renderer`] both terminal modules export.

use std::time::Duration;

use crossterm::event;

use crate::core::{ModuleError, ModuleResult, Renderer};
use crate::fb::{Cell, FrameBuffer};
use crate::flush::TerminalSurface;
use crate::palette::Palette;
use crate::types::{Color, Event, Position, Text, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

/// Terminal rows reserved above the game grid for the score line.
const GRID_TOP: i32 = 2;

/// Terminal columns per game grid cell.
const CELL_COLUMNS: i32 = 2;

/// Size used until the real terminal size is known.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

pub struct TermBackend {
    name: String,
    palette: Palette,
    surface: TerminalSurface,
    fb: FrameBuffer,
    window: (u32, u32),
    cell_size: u32,
    open: bool,
}

impl TermBackend {
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        let (cols, rows) = FALLBACK_SIZE;
        Self {
            name: name.into(),
            palette,
            surface: TerminalSurface::new(),
            fb: FrameBuffer::new(cols, rows),
            window: (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            cell_size: 20,
            open: false,
        }
    }

    /// Draw into a fixed-size buffer without touching the terminal.
    pub fn headless(name: impl Into<String>, palette: Palette, cols: u16, rows: u16) -> Self {
        let mut backend = Self::new(name, palette);
        backend.fb.resize(cols, rows);
        backend
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// The frame being built since the last `clear`.
    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// Window-space point to terminal cell.
    fn to_cell(&self, pos: Position) -> (i32, i32) {
        (
            scale(pos.x, self.window.0, self.fb.width()),
            scale(pos.y, self.window.1, self.fb.height()),
        )
    }

    fn resize_to_terminal(&mut self) {
        if let Ok((cols, rows)) = TerminalSurface::size() {
            self.fb.resize(cols, rows);
            self.surface.invalidate();
        }
    }
}

/// `v` in `0..extent` mapped onto `0..cells`.
fn scale(v: i32, extent: u32, cells: u16) -> i32 {
    if extent == 0 {
        return 0;
    }
    ((i64::from(v) * i64::from(cells)) / i64::from(extent)) as i32
}

impl Renderer for TermBackend {
    fn init(&mut self, width: u32, height: u32, _title: &str) -> ModuleResult<()> {
        self.window = (width.max(1), height.max(1));
        self.surface
            .enter()
            .map_err(|e| ModuleError::Unavailable(format!("{e:#}")))?;
        self.resize_to_terminal();
        self.fb.clear();
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        if !self.open && !self.surface.is_active() {
            return;
        }
        self.open = false;
        // Nothing useful to do if the terminal refuses to be restored.
        let _ = self.surface.leave();
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn clear(&mut self) {
        self.fb.clear();
    }

    fn display(&mut self) -> ModuleResult<()> {
        if !self.open {
            return Err(ModuleError::InvalidState("display on a closed backend".into()));
        }
        self.surface
            .draw_swap(&mut self.fb)
            .map_err(|e| ModuleError::other(format!("{e:#}")))?;
        // `fb` now holds the previous frame.
        self.fb.clear();
        Ok(())
    }

    fn poll_event(&mut self) -> Event {
        if !self.open {
            return Event::None;
        }
        match event::poll(Duration::ZERO) {
            Ok(true) => match event::read() {
                Ok(event::Event::Resize(..)) => {
                    self.resize_to_terminal();
                    Event::None
                }
                Ok(ev) => arcade_input::map_terminal_event(&ev),
                Err(_) => Event::None,
            },
            _ => Event::None,
        }
    }

    fn draw_rect(&mut self, pos: Position, width: u32, height: u32, color: Color) {
        let (x, y) = self.to_cell(pos);
        let w = scale(width as i32, self.window.0, self.fb.width()).max(1);
        let h = scale(height as i32, self.window.1, self.fb.height()).max(1);
        let (ch, style) = self.palette.fill(color);
        self.fb.fill_rect(x, y, w, h, ch, style);
    }

    fn draw_circle(&mut self, center: Position, radius: u32, color: Color) {
        let (cx, cy) = self.to_cell(center);
        let rx = scale(radius as i32, self.window.0, self.fb.width());
        let ry = scale(radius as i32, self.window.1, self.fb.height());
        let (ch, style) = self.palette.fill(color);
        self.fb.fill_ellipse(cx, cy, rx, ry, ch, style);
    }

    fn draw_text(&mut self, text: &Text) {
        let (x, y) = self.to_cell(text.position);
        let fg = self.palette.text(text.color);
        self.fb.put_str(x, y, &text.content, fg);
        if self.palette.bold_text() {
            for i in 0..text.content.chars().count() as i32 {
                if let Some(mut cell) = self.fb.get(x + i, y) {
                    cell.style.bold = true;
                    self.fb.set(x + i, y, cell);
                }
            }
        }
    }

    fn draw_cell(&mut self, x: i32, y: i32, color: Color) {
        let (ch, style) = self.palette.fill(color);
        let col = x * CELL_COLUMNS;
        let row = y + GRID_TOP;
        for dx in 0..CELL_COLUMNS {
            self.fb.set(col + dx, row, Cell { ch, style });
        }
    }

    fn set_cell_size(&mut self, size: u32) {
        self.cell_size = size.max(1);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TermBackend {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for TermBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermBackend")
            .field("name", &self.name)
            .field("palette", &self.palette)
            .field("open", &self.open)
            .field("cell_size", &self.cell_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Rgb;

    #[test]
    fn closed_backend_is_inert() {
        let mut backend = TermBackend::headless("t", Palette::TrueColor, 40, 12);
        assert!(!backend.is_open());
        assert_eq!(backend.poll_event(), Event::None);
        assert!(backend.display().is_err());
        backend.close();
        backend.close();
        assert!(!backend.is_open());
    }

    #[test]
    fn text_is_scaled_from_window_space() {
        let mut backend = TermBackend::headless("t", Palette::TrueColor, 80, 24);
        backend.draw_text(&Text::new("ARCADE", Position::new(400, 300)));
        assert_eq!(&backend.frame().row_text(12)[40..46], "ARCADE");
    }

    #[test]
    fn cells_are_two_columns_wide() {
        let mut backend = TermBackend::headless("t", Palette::TrueColor, 20, 10);
        backend.draw_cell(3, 1, Color::GREEN);
        let row = 1 + GRID_TOP;
        for x in [6, 7] {
            assert_eq!(backend.frame().get(x, row).unwrap().style.bg, Rgb::new(0, 255, 0));
        }
        assert_eq!(backend.frame().get(8, row).unwrap().style.bg, Rgb::BLACK);
    }

    #[test]
    fn ascii_palette_draws_glyphs() {
        let mut backend = TermBackend::headless("t", Palette::Ascii, 20, 10);
        backend.draw_cell(0, 0, Color::RED);
        assert_eq!(backend.frame().row_text(GRID_TOP), "@@                  ");
        backend.clear();
        assert_eq!(backend.frame().row_text(GRID_TOP).trim(), "");
    }

    #[test]
    fn rects_cover_at_least_one_cell() {
        let mut backend = TermBackend::headless("t", Palette::Ascii, 80, 24);
        backend.draw_rect(Position::new(0, 0), 1, 1, Color::WHITE);
        assert_eq!(backend.frame().get(0, 0).unwrap().ch, '#');
        assert_eq!(backend.frame().get(1, 0).unwrap().ch, ' ');
    }
}
