//! Menu, gameplay frame and end-of-game screen.

use std::path::Path;

use tracing::{debug, info, warn};

use super::{sleep, Flow, Orchestrator};
use crate::core::Renderer;
use crate::error::{EngineError, Result};
use crate::loader::ModuleLoader;
use crate::registry::{cycle_index, Direction};
use crate::types::{Color, Event, GameState, Position, Text, HIGH_SCORE_MENU_ROWS};

const HIGHLIGHT: Color = Color::GREEN;

impl<L: ModuleLoader> Orchestrator<L> {
    /// Handle one menu event, then draw the menu if still in it.
    pub(super) fn menu_step(&mut self, event: Event) -> Result<()> {
        let games = self.modules.games.len();
        match event {
            Event::MoveUp => {
                if let Some(i) = cycle_index(self.game_index, Direction::Prev, games) {
                    self.game_index = i;
                }
            }
            Event::MoveDown => {
                if let Some(i) = cycle_index(self.game_index, Direction::Next, games) {
                    self.game_index = i;
                }
            }
            Event::MoveLeft => {
                self.switch_renderer(Direction::Prev)?;
                self.cooldown();
            }
            Event::MoveRight => {
                self.switch_renderer(Direction::Next)?;
                self.cooldown();
            }
            Event::Action => self.start_selected_game(),
            _ => {}
        }

        if self.in_menu() {
            self.draw_menu();
        }
        Ok(())
    }

    /// Forward the event, advance the game by `dt` and draw the frame.
    pub(super) fn play_step(&mut self, event: Event, dt: f32) -> Result<Flow> {
        let Some(handle) = self.game.as_mut() else {
            self.state = GameState::Menu;
            return Ok(Flow::Continue);
        };
        let path = handle.path().to_path_buf();
        let Some(game) = handle.get() else {
            self.state = GameState::Menu;
            return Ok(Flow::Continue);
        };

        match event {
            Event::Pause => {
                let state = game.state().toggle_pause();
                game.set_state(state);
                debug!(state = state.as_str(), "pause toggled");
            }
            Event::None => {}
            other => game.handle_event(other),
        }

        if let Err(e) = game.update(dt) {
            self.game_fault(EngineError::runtime(&path, e));
            return Ok(Flow::Continue);
        }
        self.state = game.state();

        if self.state.is_terminal() {
            return Ok(self.end_screen());
        }

        let (Some(renderer), Some(game)) = (
            self.renderer.as_mut().and_then(|h| h.get()),
            self.game.as_mut().and_then(|h| h.get()),
        ) else {
            return Ok(Flow::Continue);
        };

        renderer.clear();
        if let Err(e) = game.render(renderer) {
            self.game_fault(EngineError::runtime(&path, e));
            return Ok(Flow::Continue);
        }
        draw_score(renderer, game.score(), game.state());
        if let Err(e) = renderer.display() {
            warn!("display failed: {}", e);
        }

        if self.renderer_is_open() {
            Ok(Flow::Continue)
        } else {
            Ok(Flow::Exit)
        }
    }

    /// Freeze the finished round and wait for the player's choice.
    ///
    /// Action or Menu returns to the menu, Pause replays the same game, Quit
    /// or a closed renderer ends the session.
    pub(super) fn end_screen(&mut self) -> Flow {
        self.commit_score();
        let outcome = self.state;
        let path = self.game_path().map(Path::to_path_buf).unwrap_or_default();
        info!(state = outcome.as_str(), "round over in {}", path.display());

        loop {
            let (Some(renderer), Some(game)) = (
                self.renderer.as_mut().and_then(|h| h.get()),
                self.game.as_mut().and_then(|h| h.get()),
            ) else {
                self.state = GameState::Menu;
                return Flow::Continue;
            };
            if !renderer.is_open() {
                return Flow::Exit;
            }

            renderer.clear();
            if let Err(e) = game.render(renderer) {
                debug!("frozen frame render failed: {}", e);
            }
            draw_end_overlay(renderer, outcome, game.score());
            if let Err(e) = renderer.display() {
                warn!("display failed: {}", e);
            }

            match renderer.poll_event() {
                Event::Action | Event::Menu => {
                    game.stop();
                    self.state = GameState::Menu;
                    self.clock.reset();
                    return Flow::Continue;
                }
                Event::Pause => {
                    let restarted = game
                        .restart()
                        .map(|()| game.set_state(GameState::Playing));
                    match restarted {
                        Ok(()) => {
                            self.state = GameState::Playing;
                            self.clock.reset();
                            info!("replaying {}", path.display());
                        }
                        Err(e) => self.game_fault(EngineError::runtime(&path, e)),
                    }
                    return Flow::Continue;
                }
                Event::Quit => {
                    renderer.close();
                    return Flow::Exit;
                }
                _ => sleep(self.config.timing.end_screen_poll),
            }
        }
    }

    fn draw_menu(&mut self) {
        let Some(renderer) = self.renderer.as_mut().and_then(|h| h.get()) else {
            return;
        };

        renderer.clear();
        renderer.draw_text(
            &Text::new("ARCADE", Position::new(350, 50))
                .with_color(Color::YELLOW)
                .with_size(48),
        );

        renderer.draw_text(
            &Text::new("Renderers (Left/Right to switch):", Position::new(100, 150)).with_size(18),
        );
        for (i, path) in self.modules.renderers.iter().enumerate() {
            let color = if i == self.renderer_index { HIGHLIGHT } else { Color::WHITE };
            let y = 180 + 25 * i as i32;
            renderer.draw_text(&Text::new(module_label(path), Position::new(120, y)).with_color(color));
        }

        renderer.draw_text(&Text::new("Games (Up/Down to select):", Position::new(100, 300)).with_size(18));
        if self.modules.games.is_empty() {
            renderer.draw_text(
                &Text::new("no game modules found", Position::new(120, 330)).with_color(Color::GRAY),
            );
        }
        for (i, path) in self.modules.games.iter().enumerate() {
            let color = if i == self.game_index { HIGHLIGHT } else { Color::WHITE };
            let y = 330 + 25 * i as i32;
            renderer.draw_text(&Text::new(module_label(path), Position::new(120, y)).with_color(color));
        }

        if !self.scores.is_empty() {
            renderer.draw_text(&Text::new("High Scores:", Position::new(500, 300)).with_size(18));
            for (i, entry) in self.scores.entries().iter().take(HIGH_SCORE_MENU_ROWS).enumerate() {
                let y = 330 + 25 * i as i32;
                renderer.draw_text(&Text::new(
                    format!("{}: {}", entry.name, entry.score),
                    Position::new(500, y),
                ));
            }
        }

        renderer.draw_text(&Text::new("Enter: start   n/b: renderer   ]/[: game", Position::new(100, 500)));
        renderer.draw_text(&Text::new("m: menu   p: pause   q/Esc: quit", Position::new(100, 530)));

        if let Err(e) = renderer.display() {
            warn!("display failed: {}", e);
        }
    }
}

fn draw_score(renderer: &mut dyn Renderer, score: u32, state: GameState) {
    renderer.draw_text(
        &Text::new(format!("Score: {score}"), Position::new(50, 20)).with_color(Color::YELLOW),
    );
    if state == GameState::Paused {
        renderer.draw_text(
            &Text::new("PAUSED", Position::new(360, 280))
                .with_color(Color::YELLOW)
                .with_size(32),
        );
    }
}

fn draw_end_overlay(renderer: &mut dyn Renderer, outcome: GameState, score: u32) {
    let title = if outcome == GameState::Win { "YOU WIN" } else { "GAME OVER" };
    renderer.draw_text(
        &Text::new(title, Position::new(350, 250))
            .with_color(Color::RED)
            .with_size(32),
    );
    renderer.draw_text(&Text::new(format!("Final Score: {score}"), Position::new(350, 300)).with_size(24));
    renderer.draw_text(&Text::new("Enter: menu   p: play again", Position::new(350, 350)).with_size(18));
}

/// Display name of a module file: stem without the platform library prefix.
fn module_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.strip_prefix(std::env::consts::DLL_PREFIX)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or(stem)
}
