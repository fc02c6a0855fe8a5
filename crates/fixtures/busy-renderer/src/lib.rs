//! Renderer whose `init` always fails with an error built inside the module.

use arcade_core::types::{Color, Event, Position, Text};
use arcade_core::{ModuleError, ModuleResult, Renderer};

#[derive(Default)]
pub struct Busy {
    open: bool,
}

impl Renderer for Busy {
    fn init(&mut self, width: u32, height: u32, _title: &str) -> ModuleResult<()> {
        Err(ModuleError::Unavailable(format!(
            "display busy ({width}x{height})"
        )))
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn clear(&mut self) {}

    fn display(&mut self) -> ModuleResult<()> {
        Err(ModuleError::InvalidState("never opened".to_string()))
    }

    fn poll_event(&mut self) -> Event {
        Event::None
    }

    fn draw_rect(&mut self, _pos: Position, _width: u32, _height: u32, _color: Color) {}

    fn draw_circle(&mut self, _center: Position, _radius: u32, _color: Color) {}

    fn draw_text(&mut self, _text: &Text) {}

    fn draw_cell(&mut self, _x: i32, _y: i32, _color: Color) {}

    fn set_cell_size(&mut self, _size: u32) {}

    fn name(&self) -> &str {
        "Busy"
    }
}

arcade_core::export_renderer!(Busy::default());
