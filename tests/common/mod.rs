//! Scripted renderer and game modules for driving the orchestrator in-process.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::env::consts::{DLL_EXTENSION, DLL_PREFIX};
use std::path::PathBuf;
use std::rc::Rc;

use arcade::core::{Game, ModuleError, ModuleResult, Renderer};
use arcade::engine::{EngineConfig, ModuleCatalog, Orchestrator, SwapTiming};
use arcade::loader::{BuiltinLoader, ModuleLoader};
use arcade::types::{Color, Event, GameState, Position, Text};
use tempfile::TempDir;

/// Input queue and call log shared by every module of one test.
#[derive(Clone, Default)]
pub struct Script {
    events: Rc<RefCell<VecDeque<Event>>>,
    calls: Rc<RefCell<Vec<String>>>,
    texts: Rc<RefCell<Vec<String>>>,
    dts: Rc<RefCell<Vec<f32>>>,
}

impl Script {
    /// Queue events for whichever renderer polls next. An empty queue yields `None`.
    pub fn push(&self, events: impl IntoIterator<Item = Event>) {
        self.events.borrow_mut().extend(events);
    }

    pub fn pending(&self) -> usize {
        self.events.borrow().len()
    }

    fn pop(&self) -> Event {
        self.events.borrow_mut().pop_front().unwrap_or(Event::None)
    }

    fn record(&self, module: &str, call: &str) {
        self.calls.borrow_mut().push(format!("{module}:{call}"));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Position of the first occurrence of `call` in the log.
    pub fn first(&self, call: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }

    pub fn saw_text(&self, needle: &str) -> bool {
        self.texts.borrow().iter().any(|t| t.contains(needle))
    }

    pub fn clear_texts(&self) {
        self.texts.borrow_mut().clear();
    }

    pub fn dts(&self) -> Vec<f32> {
        self.dts.borrow().clone()
    }
}

/// How a scripted renderer reacts to `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Opens,
    /// `init` succeeds but `is_open` never turns true.
    NeverOpens,
    FailsInit,
    /// Opens, then reports closed after its first `display`.
    DiesAfterFirstFrame,
    /// Opens this many times across all instances of the module, then fails.
    OpensTimes(u32),
    /// The factory cannot construct an instance.
    NoInstance,
}

pub struct ScriptedRenderer {
    name: String,
    behavior: Behavior,
    budget: Rc<Cell<u32>>,
    open: bool,
    script: Script,
}

impl ScriptedRenderer {
    fn log(&self, call: &str) {
        self.script.record(&self.name, call);
    }
}

impl Renderer for ScriptedRenderer {
    fn init(&mut self, _width: u32, _height: u32, _title: &str) -> ModuleResult<()> {
        self.log("init");
        match self.behavior {
            Behavior::Opens | Behavior::DiesAfterFirstFrame => self.open = true,
            Behavior::NeverOpens => self.open = false,
            Behavior::FailsInit | Behavior::NoInstance => {
                return Err(ModuleError::Unavailable("no terminal".into()))
            }
            Behavior::OpensTimes(_) => {
                if self.budget.get() == 0 {
                    return Err(ModuleError::Unavailable("resource busy".into()));
                }
                self.budget.set(self.budget.get() - 1);
                self.open = true;
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            self.log("close");
        }
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn clear(&mut self) {}

    fn display(&mut self) -> ModuleResult<()> {
        if !self.open {
            return Err(ModuleError::InvalidState("display on closed renderer".into()));
        }
        if self.behavior == Behavior::DiesAfterFirstFrame {
            self.open = false;
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Event {
        self.script.pop()
    }

    fn draw_rect(&mut self, _pos: Position, _width: u32, _height: u32, _color: Color) {}

    fn draw_circle(&mut self, _center: Position, _radius: u32, _color: Color) {}

    fn draw_text(&mut self, text: &Text) {
        self.script.texts.borrow_mut().push(text.content.clone());
    }

    fn draw_cell(&mut self, _x: i32, _y: i32, _color: Color) {}

    fn set_cell_size(&mut self, _size: u32) {}

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ScriptedRenderer {
    fn drop(&mut self) {
        self.log("drop");
    }
}

/// Behaviour of a scripted game.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rules {
    /// Points added by every `update` while playing.
    pub points_per_update: u32,
    /// Ends the round in the given state once the score reaches the limit.
    pub end_at: Option<(u32, GameState)>,
    /// `update` fails when called with this score.
    pub fail_update_at: Option<u32>,
    pub fail_init: bool,
    /// `init` fails when resuming a round in progress.
    pub fail_resume: bool,
}

impl Rules {
    pub fn scoring(points: u32) -> Self {
        Self {
            points_per_update: points,
            ..Self::default()
        }
    }
}

pub struct ScoreGame {
    name: String,
    rules: Rules,
    state: GameState,
    score: u32,
    in_round: bool,
    script: Script,
}

impl ScoreGame {
    fn log(&self, call: &str) {
        self.script.record(&self.name, call);
    }
}

impl Game for ScoreGame {
    fn init(&mut self) -> ModuleResult<()> {
        self.log("init");
        if self.rules.fail_init || (self.rules.fail_resume && self.in_round) {
            return Err(ModuleError::other("init refused"));
        }
        if !self.in_round {
            self.score = 0;
            self.in_round = true;
        }
        self.state = GameState::Playing;
        Ok(())
    }

    fn stop(&mut self) {
        self.log("stop");
        self.state = GameState::Menu;
    }

    fn restart(&mut self) -> ModuleResult<()> {
        self.log("restart");
        self.score = 0;
        self.in_round = true;
        self.state = GameState::Playing;
        Ok(())
    }

    fn update(&mut self, dt: f32) -> ModuleResult<()> {
        if self.state != GameState::Playing {
            return Ok(());
        }
        self.script.dts.borrow_mut().push(dt);
        if self.rules.fail_update_at == Some(self.score) {
            return Err(ModuleError::other("update exploded"));
        }
        self.score += self.rules.points_per_update;
        if let Some((limit, end)) = self.rules.end_at {
            if self.score >= limit {
                self.state = end;
                self.in_round = false;
            }
        }
        Ok(())
    }

    fn render(&mut self, renderer: &mut dyn Renderer) -> ModuleResult<()> {
        renderer.draw_cell(0, 0, Color::GREEN);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        self.log(event.as_str());
    }

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
        &self.name
    }
}

impl Drop for ScoreGame {
    fn drop(&mut self) {
        self.log("drop");
    }
}

/// A module directory in a tempdir plus the loader registered against it.
///
/// Keep the `Arcade` alive longer than the orchestrator built from it: the
/// orchestrator writes its high-score file into the same directory on drop.
pub struct Arcade {
    pub dir: TempDir,
    pub script: Script,
    pub config: EngineConfig,
    loader: BuiltinLoader,
}

impl Arcade {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            module_dir: dir.path().join("lib"),
            high_score_file: dir.path().join("highscores.txt"),
            catalog: ModuleCatalog::new(["gfx_"], ["game_"]),
            timing: SwapTiming::immediate(),
            ..EngineConfig::default()
        };
        std::fs::create_dir_all(&config.module_dir).unwrap();
        Self {
            dir,
            script: Script::default(),
            config,
            loader: BuiltinLoader::new(),
        }
    }

    fn touch(&self, stem: &str) -> PathBuf {
        let path = self
            .config
            .module_dir
            .join(format!("{DLL_PREFIX}{stem}.{DLL_EXTENSION}"));
        std::fs::write(&path, b"").unwrap();
        path
    }

    /// Register renderer `gfx_<name>`; its instances report `name`.
    pub fn renderer(&mut self, name: &str, behavior: Behavior) -> PathBuf {
        let path = self.touch(&format!("gfx_{}", name.to_lowercase()));
        self.register_renderer_at(path.clone(), name, behavior);
        path
    }

    /// Register a renderer under an arbitrary path without creating a file.
    pub fn register_renderer_at(&mut self, path: PathBuf, name: &str, behavior: Behavior) {
        let script = self.script.clone();
        let name = name.to_string();
        let budget = Rc::new(Cell::new(match behavior {
            Behavior::OpensTimes(n) => n,
            _ => 0,
        }));
        self.loader.register_renderer(path, move || {
            if behavior == Behavior::NoInstance {
                return None;
            }
            script.record(&name, "new");
            Some(Box::new(ScriptedRenderer {
                name: name.clone(),
                behavior,
                budget: budget.clone(),
                open: false,
                script: script.clone(),
            }) as Box<dyn Renderer>)
        });
    }

    /// Register game `game_<name>`; its instances report `name`.
    pub fn game(&mut self, name: &str, rules: Rules) -> PathBuf {
        let path = self.touch(&format!("game_{}", name.to_lowercase()));
        let script = self.script.clone();
        let name = name.to_string();
        self.loader.register_game(path.clone(), move || {
            script.record(&name, "new");
            Some(Box::new(ScoreGame {
                name: name.clone(),
                rules,
                state: GameState::Menu,
                score: 0,
                in_round: false,
                script: script.clone(),
            }) as Box<dyn Game>)
        });
        path
    }

    /// Hand the registered modules to a new orchestrator.
    pub fn orchestrator(&mut self) -> Orchestrator<BuiltinLoader> {
        Orchestrator::new(self.take_loader(), self.config.clone())
    }

    /// Take the registered modules, for tests that wrap them in another loader.
    pub fn take_loader(&mut self) -> BuiltinLoader {
        std::mem::take(&mut self.loader)
    }

    pub fn high_score_text(&self) -> String {
        std::fs::read_to_string(&self.config.high_score_file).unwrap_or_default()
    }
}

/// Run `steps` loop iterations, each expected to continue.
pub fn steps<L: ModuleLoader>(orch: &mut Orchestrator<L>, steps: usize) {
    for _ in 0..steps {
        assert_eq!(orch.step().unwrap(), arcade::engine::Flow::Continue);
    }
}
