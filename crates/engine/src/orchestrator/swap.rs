//! Renderer hot-swap and game switching.

use std::path::Path;

use tracing::{debug, error, info, warn};

use super::{sleep, Orchestrator};
use crate::config::{SwapTiming, WindowConfig};
use crate::error::{EngineError, Result};
use crate::loader::{GameHandle, ModuleLoader, RendererHandle};
use crate::registry::{cycle_index, same_module, Direction};
use crate::types::{Color, GameState, Position, Text};

/// A game parked while its renderer is replaced.
struct Retained {
    handle: GameHandle,
    state: GameState,
}

impl<L: ModuleLoader> Orchestrator<L> {
    /// Replace the active renderer with its neighbour in the renderer list.
    ///
    /// A running game keeps its round and state across the swap. If the
    /// target never opens, the previous renderer is restored, then every
    /// other candidate is tried once. Only an exhausted chain is an error.
    pub fn switch_renderer(&mut self, direction: Direction) -> Result<()> {
        self.rescan();
        let count = self.modules.renderers.len();
        let Some(target) = cycle_index(self.renderer_index, direction, count) else {
            debug!("no renderer modules; ignoring swap request");
            return Ok(());
        };
        let previous_index = self.renderer_index;
        let target_path = self.modules.renderers[target].clone();
        info!(
            from = previous_index,
            to = target,
            "switching renderer to {}",
            target_path.display()
        );

        let retained = self.park_game();

        let mut previous = self.renderer.take();
        if let Some(renderer) = previous.as_mut().and_then(|h| h.get()) {
            renderer.close();
        }
        sleep(self.config.timing.release_delay);

        let outcome = self
            .load_and_open(&target_path)
            .and_then(|mut handle| self.settle(&mut handle).map(|()| handle));

        let result = match outcome {
            Ok(handle) => {
                drop(previous);
                self.renderer = Some(handle);
                self.renderer_index = target;
                info!("renderer {} active", target_path.display());
                Ok(())
            }
            Err(e) => {
                warn!("renderer {} failed: {}", target_path.display(), e);
                self.recover_renderer(previous, previous_index, target)
            }
        };

        match result {
            Ok(()) => {
                self.resume_game(retained);
                Ok(())
            }
            Err(e) => {
                if let Some(parked) = retained {
                    self.game = Some(parked.handle);
                }
                self.state = GameState::Menu;
                Err(e)
            }
        }
    }

    /// Replace the active game with its neighbour in the game list.
    ///
    /// Failures leave the session in `Menu`; there is no fallback.
    pub fn switch_game(&mut self, direction: Direction) {
        self.rescan();
        let count = self.modules.games.len();
        let Some(target) = cycle_index(self.game_index, direction, count) else {
            debug!("no game modules; ignoring switch request");
            return;
        };

        self.unload_game();
        self.game_index = target;
        if let Err(e) = self.load_game(target) {
            warn!("cannot switch game: {}", e);
        }
    }

    /// Start the game selected in the menu.
    ///
    /// The loaded game is restarted if it is the selected one; otherwise it
    /// is unloaded and the selection loaded in its place.
    pub fn start_selected_game(&mut self) {
        let Some(path) = self.modules.games.get(self.game_index).cloned() else {
            debug!("no game selected");
            return;
        };

        let loaded = self
            .game
            .as_ref()
            .map_or(false, |h| same_module(h.path(), &path));

        if loaded {
            let restarted = match self.game.as_mut() {
                Some(handle) => handle
                    .instance()
                    .map_err(EngineError::from)
                    .and_then(|game| {
                        game.restart()
                            .map_err(|e| EngineError::runtime(&path, e))?;
                        game.set_state(GameState::Playing);
                        Ok(())
                    }),
                None => return,
            };
            match restarted {
                Ok(()) => {
                    self.state = GameState::Playing;
                    info!("restarted {}", path.display());
                }
                Err(e) => self.game_fault(e),
            }
        } else {
            self.unload_game();
            if let Err(e) = self.load_game(self.game_index) {
                warn!("cannot start game: {}", e);
            }
        }
    }

    /// Load, construct and init the game at `index`, then set it `Playing`.
    pub(super) fn load_game(&mut self, index: usize) -> Result<()> {
        let Some(path) = self.modules.games.get(index).cloned() else {
            self.state = GameState::Menu;
            return Ok(());
        };

        let loaded = self.loader.load_game(&path).map_err(EngineError::from).and_then(
            |mut handle| {
                let game = handle.instance()?;
                game.init().map_err(|e| EngineError::runtime(&path, e))?;
                game.set_state(GameState::Playing);
                Ok(handle)
            },
        );

        match loaded {
            Ok(handle) => {
                self.game = Some(handle);
                self.state = GameState::Playing;
                info!("game {} started", path.display());
                Ok(())
            }
            Err(e) => {
                self.state = GameState::Menu;
                Err(e)
            }
        }
    }

    /// Commit a running game's score, stop it and drop its handle.
    pub(super) fn unload_game(&mut self) {
        if self.game.is_none() {
            return;
        }
        if self.state != GameState::Menu {
            self.commit_score();
        }
        if let Some(mut handle) = self.game.take() {
            if let Some(game) = handle.get() {
                game.stop();
            }
            debug!("unloaded game {}", handle.path().display());
        }
        self.state = GameState::Menu;
    }

    /// Drop a game that returned an error, keeping its score.
    pub(super) fn game_fault(&mut self, err: EngineError) {
        error!("game fault: {}", err);
        self.commit_score();
        if let Some(mut handle) = self.game.take() {
            if let Some(game) = handle.get() {
                game.stop();
            }
        }
        self.state = GameState::Menu;
    }

    /// Open the startup renderer, falling back to any other that opens.
    pub(super) fn activate_initial_renderer(&mut self, index: usize) -> Result<()> {
        if let Some(path) = self.modules.renderers.get(index).cloned() {
            match self.load_and_open(&path) {
                Ok(handle) => {
                    self.renderer = Some(handle);
                    self.renderer_index = index;
                    return Ok(());
                }
                Err(e) => warn!("initial renderer {} failed: {}", path.display(), e),
            }
        }
        self.fall_back(&[index])
    }

    /// Stop the game before its renderer goes away.
    ///
    /// A running game is parked with its state; a game idling in the menu is
    /// unloaded.
    fn park_game(&mut self) -> Option<Retained> {
        let state = self.game.as_mut()?.get().map(|g| g.state())?;
        if self.state == GameState::Menu || state == GameState::Menu {
            self.unload_game();
            return None;
        }

        self.commit_score();
        let mut handle = self.game.take()?;
        if let Some(game) = handle.get() {
            game.stop();
        }
        debug!(state = state.as_str(), "parked game {}", handle.path().display());
        Some(Retained { handle, state })
    }

    /// Reinstall a parked game under the now active renderer.
    fn resume_game(&mut self, retained: Option<Retained>) {
        let Some(Retained { mut handle, state }) = retained else {
            self.state = GameState::Menu;
            return;
        };

        let path = handle.path().to_path_buf();
        let resumed = handle
            .instance()
            .map_err(EngineError::from)
            .and_then(|game| {
                game.init().map_err(|e| EngineError::runtime(&path, e))?;
                game.set_state(state);
                Ok(())
            });

        match resumed {
            Ok(()) => {
                self.game = Some(handle);
                self.state = state;
                debug!(state = state.as_str(), "resumed game {}", path.display());
            }
            Err(e) => {
                warn!("game did not survive the renderer swap: {}", e);
                drop(handle);
                self.state = GameState::Menu;
            }
        }
    }

    /// Put back the previous renderer, or any other that opens.
    fn recover_renderer(
        &mut self,
        previous: Option<RendererHandle>,
        previous_index: usize,
        failed: usize,
    ) -> Result<()> {
        if let Some(mut handle) = previous {
            let path = handle.path().to_path_buf();
            let still_open = handle.get().map_or(false, |r| r.is_open());
            let reopened = if still_open {
                Ok(())
            } else {
                open_renderer(&mut handle, &self.config.window, &self.config.timing)
            };

            match reopened {
                Ok(()) => {
                    self.renderer = Some(handle);
                    self.renderer_index = previous_index;
                    info!("restored previous renderer {}", path.display());
                    return Ok(());
                }
                Err(e) => {
                    warn!("previous renderer did not reopen: {}; reloading", e);
                    close_quietly(&mut handle);
                    drop(handle);
                    match self.load_and_open(&path) {
                        Ok(handle) => {
                            self.renderer = Some(handle);
                            self.renderer_index = previous_index;
                            info!("reloaded previous renderer {}", path.display());
                            return Ok(());
                        }
                        Err(e) => warn!("reloading {} failed: {}", path.display(), e),
                    }
                }
            }
        }

        self.fall_back(&[previous_index, failed])
    }

    /// Try every renderer not in `skip`, in index order, once each.
    fn fall_back(&mut self, skip: &[usize]) -> Result<()> {
        let candidates: Vec<(usize, _)> = self
            .modules
            .renderers
            .iter()
            .cloned()
            .enumerate()
            .filter(|(i, _)| !skip.contains(i))
            .collect();

        for (index, path) in candidates {
            match self.load_and_open(&path) {
                Ok(handle) => {
                    self.renderer = Some(handle);
                    self.renderer_index = index;
                    warn!("fell back to renderer {}", path.display());
                    return Ok(());
                }
                Err(e) => warn!("fallback renderer {} failed: {}", path.display(), e),
            }
        }

        error!("no renderer could be opened");
        Err(EngineError::NoUsableRenderer)
    }

    fn load_and_open(&self, path: &Path) -> Result<RendererHandle> {
        let mut handle = self.loader.load_renderer(path)?;
        match open_renderer(&mut handle, &self.config.window, &self.config.timing) {
            Ok(()) => Ok(handle),
            Err(e) => {
                close_quietly(&mut handle);
                Err(e)
            }
        }
    }

    /// Show the transition frame, wait, and confirm the renderer stayed open.
    fn settle(&self, handle: &mut RendererHandle) -> Result<()> {
        let path = handle.path().to_path_buf();
        let renderer = handle.instance()?;
        renderer.clear();
        renderer.draw_text(
            &Text::new("Switching libraries...", Position::new(350, 300))
                .with_color(Color::WHITE)
                .with_size(24),
        );
        if let Err(e) = renderer.display() {
            warn!("transition frame failed on {}: {}", path.display(), e);
        }

        sleep(self.config.timing.settle_delay);

        if renderer.is_open() {
            Ok(())
        } else {
            close_quietly(handle);
            Err(EngineError::Closed { path })
        }
    }
}

/// `init` the renderer and poll `is_open` within the retry budget.
fn open_renderer(
    handle: &mut RendererHandle,
    window: &WindowConfig,
    timing: &SwapTiming,
) -> Result<()> {
    let path = handle.path().to_path_buf();
    let renderer = handle.instance()?;
    renderer
        .init(window.width, window.height, &window.title)
        .map_err(|e| EngineError::runtime(&path, e))?;

    let attempts = timing.open_attempts.max(1);
    for attempt in 1..=attempts {
        if renderer.is_open() {
            debug!(attempt, "renderer {} is open", path.display());
            return Ok(());
        }
        if attempt < attempts {
            sleep(timing.open_poll_interval);
        }
    }
    Err(EngineError::Init { path, attempts })
}

fn close_quietly(handle: &mut RendererHandle) {
    if let Some(renderer) = handle.get() {
        renderer.close();
    }
}
