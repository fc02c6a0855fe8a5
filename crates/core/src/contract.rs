//! The two capability contracts a module can implement.

use crate::error::ModuleResult;
use crate::types::{Color, Event, GameState, Position, Text};

/// Which bucket a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Renderer,
    Game,
}

impl ModuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Renderer => "renderer",
            ModuleKind::Game => "game",
        }
    }
}

/// Marker tying a trait-object type to its module kind.
///
/// Implemented for `dyn Renderer` and `dyn Game`; module handles are generic
/// over it.
pub trait Contract: 'static {
    const KIND: ModuleKind;
}

impl Contract for dyn Renderer {
    const KIND: ModuleKind = ModuleKind::Renderer;
}

impl Contract for dyn Game {
    const KIND: ModuleKind = ModuleKind::Game;
}

/// A rendering backend (terminal, window system, ...).
///
/// Frames are built with `clear`, any number of draw calls, then `display`.
pub trait Renderer {
    /// Acquire the backend's resources and open the surface.
    ///
    /// May fail if those resources are held elsewhere.
    fn init(&mut self, width: u32, height: u32, title: &str) -> ModuleResult<()>;

    /// Release the surface. Idempotent.
    fn close(&mut self);

    /// Liveness signal. Safe to call before `init`, where it returns `false`.
    fn is_open(&self) -> bool;

    fn clear(&mut self);

    /// Present the frame built since the last `clear`.
    fn display(&mut self) -> ModuleResult<()>;

    /// Non-blocking; at most one event per call.
    fn poll_event(&mut self) -> Event;

    fn draw_rect(&mut self, pos: Position, width: u32, height: u32, color: Color);

    fn draw_circle(&mut self, center: Position, radius: u32, color: Color);

    fn draw_text(&mut self, text: &Text);

    /// Fill one cell of a game grid.
    fn draw_cell(&mut self, x: i32, y: i32, color: Color);

    /// Size in window pixels of one grid cell.
    fn set_cell_size(&mut self, size: u32);

    fn name(&self) -> &str;
}

/// A game driven by the host's fixed-step loop.
pub trait Game {
    /// Prepare the game for play.
    ///
    /// A fresh instance starts a new round. An instance whose round is still
    /// in progress (stopped but not restarted) keeps its board and score, so
    /// the host can re-init a retained game after swapping renderers.
    fn init(&mut self) -> ModuleResult<()>;

    /// Suspend the game. The state becomes `Menu`; the round is kept.
    fn stop(&mut self);

    /// Start a new round from scratch.
    fn restart(&mut self) -> ModuleResult<()>;

    /// Advance the simulation by `dt` seconds. Ignored unless `Playing`.
    fn update(&mut self, dt: f32) -> ModuleResult<()>;

    /// Issue draw calls for the current frame.
    ///
    /// Must not call `clear` or `display`; the host owns frame boundaries.
    fn render(&mut self, renderer: &mut dyn Renderer) -> ModuleResult<()>;

    fn handle_event(&mut self, event: Event);

    fn state(&self) -> GameState;

    fn set_state(&mut self, state: GameState);

    fn score(&self) -> u32;

    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }
}
