//! Character framebuffer the terminal backends draw into.

use crate::types::Color;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness, 0..=255.
    pub fn luma(self) -> u8 {
        ((u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114) / 1000) as u8
    }
}

impl From<Color> for Rgb {
    fn from(c: Color) -> Self {
        // Alpha is applied against black.
        let scale = |v: u8| ((u16::from(v) * u16::from(c.a)) / 255) as u8;
        Rgb::new(scale(c.r), scale(c.g), scale(c.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::BLACK,
            bold: false,
        }
    }
}

impl CellStyle {
    pub fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            ..Self::default()
        }
    }

    pub fn bg(bg: Rgb) -> Self {
        Self {
            bg,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Row-major grid of styled cells. Out-of-range writes are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when possible. Contents are reset.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` left to right from `(x, y)`, clipped at the right edge.
    /// The background of covered cells is kept.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Rgb) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x.saturating_add(i as i32);
            if cx >= i32::from(self.width) {
                break;
            }
            if let Some(idx) = self.idx(cx, y) {
                let cell = &mut self.cells[idx];
                cell.ch = ch;
                cell.style.fg = fg;
            }
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, ch: char, style: CellStyle) {
        for dy in 0..h.max(0) {
            for dx in 0..w.max(0) {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Fill the ellipse centred on `(cx, cy)` with radii `rx` by `ry` cells.
    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, ch: char, style: CellStyle) {
        let (rx, ry) = (rx.max(0), ry.max(0));
        if rx == 0 || ry == 0 {
            self.put_char(cx, cy, ch, style);
            return;
        }
        let (rx2, ry2) = (i64::from(rx) * i64::from(rx), i64::from(ry) * i64::from(ry));
        for dy in -ry..=ry {
            for dx in -rx..=rx {
                let (dx2, dy2) = (i64::from(dx) * i64::from(dx), i64::from(dy) * i64::from(dy));
                if dx2 * ry2 + dy2 * rx2 <= rx2 * ry2 {
                    self.put_char(cx + dx, cy + dy, ch, style);
                }
            }
        }
    }

    /// Row `y` as plain text, for tests and debugging.
    pub fn row_text(&self, y: i32) -> String {
        (0..i32::from(self.width))
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}
