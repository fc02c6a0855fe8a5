//! Session orchestrator.
//!
//! Owns at most one renderer handle and one game handle, both discovered
//! module lists with their current indices, the logical game state and the
//! high-score table. Everything runs on the caller's thread; the only waits
//! are the bounded delays in [`SwapTiming`](crate::SwapTiming).

mod screens;
mod swap;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::clock::FrameClock;
use crate::config::EngineConfig;
use crate::core::{Game, Renderer};
use crate::error::{EngineError, Result};
use crate::loader::{GameHandle, ModuleLoader, RendererHandle};
use crate::registry::{same_module, sort_paths, DiscoveredModules, Direction, Registry};
use crate::scores::HighScoreTable;
use crate::types::{Event, GameState};

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Orchestrator<L: ModuleLoader> {
    loader: L,
    config: EngineConfig,
    registry: Registry,
    /// Renderer given at startup from outside the module directory.
    pinned_renderer: Option<PathBuf>,
    modules: DiscoveredModules,
    renderer: Option<RendererHandle>,
    renderer_index: usize,
    game: Option<GameHandle>,
    /// Loaded game's index, or the menu selection when none is loaded.
    game_index: usize,
    state: GameState,
    scores: HighScoreTable,
    clock: FrameClock,
    /// Set once the high-score file has been read; guards the rewrite.
    scores_loaded: bool,
    shut_down: bool,
}

impl<L: ModuleLoader> Orchestrator<L> {
    pub fn new(loader: L, config: EngineConfig) -> Self {
        let registry = Registry::new(config.module_dir.clone(), config.catalog.clone());
        let clock = FrameClock::new(config.timing.max_frame_dt);
        Self {
            loader,
            config,
            registry,
            pinned_renderer: None,
            modules: DiscoveredModules::default(),
            renderer: None,
            renderer_index: 0,
            game: None,
            game_index: 0,
            state: GameState::Menu,
            scores: HighScoreTable::new(),
            clock,
            scores_loaded: false,
            shut_down: false,
        }
    }

    /// Discover modules, load high scores, open `renderer` and optionally a game.
    ///
    /// `game` is a path or a case-insensitive fragment of a discovered game's
    /// file name. A game that cannot be started leaves the session in `Menu`.
    /// Fails only if no renderer can be opened.
    pub fn start(&mut self, renderer: &Path, game: Option<&str>) -> Result<()> {
        self.modules = self.registry.scan();
        if !self.modules.renderers.iter().any(|p| same_module(p, renderer)) {
            debug!("pinning renderer {} outside the module directory", renderer.display());
            self.pinned_renderer = Some(renderer.to_path_buf());
        }
        self.rescan();

        let path = &self.config.high_score_file;
        self.scores = match HighScoreTable::load(path) {
            Ok(table) => table,
            Err(e) => {
                warn!("ignoring unreadable high-score file {}: {}", path.display(), e);
                HighScoreTable::new()
            }
        };
        self.scores_loaded = true;

        let initial = self
            .modules
            .renderers
            .iter()
            .position(|p| same_module(p, renderer))
            .unwrap_or(0);
        self.activate_initial_renderer(initial)?;

        if let Some(query) = game {
            match self.find_game(query) {
                Some(index) => {
                    self.game_index = index;
                    if let Err(e) = self.load_game(index) {
                        warn!("cannot start game {}: {}", query, e);
                    }
                }
                None => warn!("no game module matches {:?}", query),
            }
        }

        self.clock.reset();
        let name = self.renderer_name().unwrap_or("?").to_string();
        info!(renderer = %name, state = self.state.as_str(), "session started");
        Ok(())
    }

    /// Run until quit, renderer closure or a fatal error, then shut down.
    pub fn run(&mut self) -> Result<()> {
        info!("entering main loop");
        let result = loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        if let Err(e) = &result {
            error!("main loop aborted: {}", e);
        }
        self.shutdown();
        result
    }

    /// One main loop iteration.
    pub fn step(&mut self) -> Result<Flow> {
        if !self.renderer_is_open() {
            info!("renderer closed; leaving main loop");
            return Ok(Flow::Exit);
        }

        let dt = self.clock.tick();
        let event = self
            .renderer_mut()
            .map(|r| r.poll_event())
            .unwrap_or_default();

        match event {
            Event::Quit => {
                info!("quit requested");
                return Ok(Flow::Exit);
            }
            Event::NextRenderer | Event::PrevRenderer => {
                let direction = if event == Event::NextRenderer {
                    Direction::Next
                } else {
                    Direction::Prev
                };
                self.switch_renderer(direction)?;
                self.cooldown();
                return Ok(Flow::Continue);
            }
            Event::NextGame | Event::PrevGame => {
                let direction = if event == Event::NextGame {
                    Direction::Next
                } else {
                    Direction::Prev
                };
                self.switch_game(direction);
                self.cooldown();
                return Ok(Flow::Continue);
            }
            Event::Menu => {
                self.return_to_menu();
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        let flow = if self.in_menu() {
            self.menu_step(event)?;
            Flow::Continue
        } else {
            self.play_step(event, dt)?
        };

        sleep(self.config.timing.frame_sleep);
        Ok(flow)
    }

    /// Commit the running game's score, stop it and show the menu.
    ///
    /// The handle is kept, so `Action` on the same entry restarts it.
    pub fn return_to_menu(&mut self) {
        if self.state != GameState::Menu {
            self.commit_score();
            if let Some(game) = self.game_mut() {
                game.stop();
            }
            info!("returned to menu");
        }
        self.state = GameState::Menu;
    }

    /// Stop the game, write the high-score file and close the renderer.
    ///
    /// Runs once; later calls do nothing. Also run on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if let Some(mut handle) = self.game.take() {
            if let Some(game) = handle.get() {
                if self.state != GameState::Menu {
                    self.scores.update(game.name(), game.score());
                }
                game.stop();
            }
        }
        self.state = GameState::Menu;

        if self.scores_loaded {
            if let Err(e) = self.save_scores() {
                warn!("{}", e);
            }
        }

        if let Some(mut handle) = self.renderer.take() {
            if let Some(renderer) = handle.get() {
                renderer.close();
            }
        }
        info!("shutdown complete");
    }

    /// Rewrite the high-score file with the current table.
    pub fn save_scores(&self) -> Result<()> {
        let path = &self.config.high_score_file;
        self.scores
            .save(path)
            .map_err(|source| EngineError::Scores {
                path: path.clone(),
                source,
            })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn renderer_index(&self) -> usize {
        self.renderer_index
    }

    pub fn game_index(&self) -> usize {
        self.game_index
    }

    pub fn modules(&self) -> &DiscoveredModules {
        &self.modules
    }

    pub fn high_scores(&self) -> &HighScoreTable {
        &self.scores
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn renderer_path(&self) -> Option<&Path> {
        self.renderer.as_ref().map(|h| h.path())
    }

    pub fn game_path(&self) -> Option<&Path> {
        self.game.as_ref().map(|h| h.path())
    }

    /// Name reported by the active renderer instance.
    pub fn renderer_name(&mut self) -> Option<&str> {
        self.renderer.as_mut()?.get().map(|r| r.name())
    }

    pub fn game_name(&mut self) -> Option<&str> {
        self.game.as_mut()?.get().map(|g| g.name())
    }

    pub fn game_score(&mut self) -> Option<u32> {
        self.game_mut().map(|g| g.score())
    }

    pub fn renderer_is_open(&mut self) -> bool {
        self.renderer_mut().map_or(false, |r| r.is_open())
    }

    fn renderer_mut(&mut self) -> Option<&mut (dyn Renderer + 'static)> {
        self.renderer.as_mut()?.get()
    }

    fn game_mut(&mut self) -> Option<&mut (dyn Game + 'static)> {
        self.game.as_mut()?.get()
    }

    fn in_menu(&self) -> bool {
        self.state == GameState::Menu || self.game.is_none()
    }

    /// Record the loaded game's score in the table.
    fn commit_score(&mut self) {
        if let Some(game) = self.game.as_mut().and_then(|h| h.get()) {
            let (name, score) = (game.name().to_string(), game.score());
            debug!(game = %name, score, "committing score");
            self.scores.update(&name, score);
        }
    }

    /// Scan again, keeping the pinned renderer and re-locating the active modules.
    fn rescan(&mut self) {
        let mut modules = self.registry.scan();
        if let Some(pinned) = &self.pinned_renderer {
            if !modules.renderers.iter().any(|p| same_module(p, pinned)) {
                modules.renderers.push(pinned.clone());
                sort_paths(&mut modules.renderers);
            }
        }
        self.modules = modules;

        if let Some(path) = self.renderer.as_ref().map(|h| h.path().to_path_buf()) {
            if let Some(i) = self.modules.renderers.iter().position(|p| same_module(p, &path)) {
                self.renderer_index = i;
            }
        }
        if let Some(path) = self.game.as_ref().map(|h| h.path().to_path_buf()) {
            if let Some(i) = self.modules.games.iter().position(|p| same_module(p, &path)) {
                self.game_index = i;
            }
        }
        if self.game_index >= self.modules.games.len() {
            self.game_index = 0;
        }
    }

    fn find_game(&self, query: &str) -> Option<usize> {
        let games = &self.modules.games;
        if let Some(i) = games.iter().position(|p| same_module(p, Path::new(query))) {
            return Some(i);
        }
        let needle = query.to_lowercase();
        games.iter().position(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    }

    fn cooldown(&mut self) {
        sleep(self.config.timing.hotkey_cooldown);
        self.clock.reset();
    }
}

impl<L: ModuleLoader> Drop for Orchestrator<L> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn sleep(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
