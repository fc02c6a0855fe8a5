//! Game scoring one point per update, failing once the score reaches
//! [`LIMIT`].
//!
//! Construction and destruction are counted so a host can check when the
//! instance is built and torn down.

use std::sync::atomic::{AtomicU32, Ordering};

use arcade_core::types::{Color, Event, GameState};
use arcade_core::{Game, ModuleError, ModuleResult, Renderer};

pub const LIMIT: u32 = 3;

static CREATED: AtomicU32 = AtomicU32::new(0);
static DESTROYED: AtomicU32 = AtomicU32::new(0);

pub struct Counter {
    state: GameState,
    score: u32,
}

impl Default for Counter {
    fn default() -> Self {
        CREATED.fetch_add(1, Ordering::SeqCst);
        Self {
            state: GameState::Menu,
            score: 0,
        }
    }
}

impl Drop for Counter {
    fn drop(&mut self) {
        DESTROYED.fetch_add(1, Ordering::SeqCst);
    }
}

impl Game for Counter {
    fn init(&mut self) -> ModuleResult<()> {
        self.state = GameState::Playing;
        Ok(())
    }

    fn stop(&mut self) {
        self.state = GameState::Menu;
    }

    fn restart(&mut self) -> ModuleResult<()> {
        self.score = 0;
        self.state = GameState::Playing;
        Ok(())
    }

    fn update(&mut self, _dt: f32) -> ModuleResult<()> {
        if self.state != GameState::Playing {
            return Ok(());
        }
        if self.score >= LIMIT {
            return Err(ModuleError::other(format!("counter overflow at {}", self.score)));
        }
        self.score += 1;
        Ok(())
    }

    fn render(&mut self, renderer: &mut dyn Renderer) -> ModuleResult<()> {
        renderer.draw_cell(self.score as i32, 0, Color::GREEN);
        Ok(())
    }

    fn handle_event(&mut self, _event: Event) {}

    fn state(&self) -> GameState {
        self.state
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn name(&self) -> &str {
        "Counter"
    }
}

arcade_core::export_game!(Counter::default());

/// Instances built by `arcade_create` so far.
#[no_mangle]
pub extern "C" fn arcade_fixture_created() -> u32 {
    CREATED.load(Ordering::SeqCst)
}

/// Instances torn down by `arcade_destroy` so far.
#[no_mangle]
pub extern "C" fn arcade_fixture_destroyed() -> u32 {
    DESTROYED.load(Ordering::SeqCst)
}
