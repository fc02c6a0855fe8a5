//! Shared types - the vocabulary spoken across the module boundary
//!
//! Everything here is plain data with no external dependencies, so the host,
//! renderer backends and game modules can all depend on it without pulling in
//! each other.
//!
//! # Coordinate Spaces
//!
//! Two coordinate spaces are in use:
//!
//! - **Window space**: [`Position`] values passed to `draw_text`, `draw_rect`
//!   and `draw_circle` are in logical pixels of the window requested at
//!   `init` (default 800x600). Backends scale them to their own surface.
//! - **Grid space**: `draw_cell(x, y, ..)` addresses a game grid cell. Games
//!   announce their cell size in pixels with `set_cell_size`.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_FRAME_DT_SECS` | 1/30 | Cap on the delta-time passed to `update` |
//! | `FRAME_SLEEP_MS` | 5 | Sleep at the end of each loop iteration |
//! | `HOTKEY_COOLDOWN_MS` | 200 | Pause after a hotkey-triggered swap |
//! | `RELEASE_DELAY_MS` | 500 | Wait after closing a backend before the next one initializes |
//! | `OPEN_POLL_ATTEMPTS` | 5 | Liveness polls allowed after `init` |
//! | `OPEN_POLL_INTERVAL_MS` | 200 | Delay between liveness polls |
//! | `SETTLE_DELAY_MS` | 500 | Delay before the post-swap liveness re-check |
//! | `END_SCREEN_POLL_MS` | 50 | Poll interval on the game-over screen |
//!
//! # Examples
//!
//! ```
//! use arcade_types::{Event, GameState, Color};
//!
//! let event = Event::from_str("nextRenderer").unwrap();
//! assert_eq!(event, Event::NextRenderer);
//! assert!(event.is_hotkey());
//!
//! assert!(GameState::GameOver.is_terminal());
//! assert_eq!(GameState::Paused.toggle_pause(), GameState::Playing);
//!
//! assert_eq!(Color::WHITE, Color::rgb(255, 255, 255));
//! ```

/// Default window width in logical pixels
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;

/// Default window height in logical pixels
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Default window title
pub const DEFAULT_WINDOW_TITLE: &str = "Arcade";

/// Upper bound on the delta-time fed to a game's `update` (seconds)
pub const MAX_FRAME_DT_SECS: f32 = 1.0 / 30.0;

/// Sleep at the end of each main loop iteration
pub const FRAME_SLEEP_MS: u64 = 5;

/// Pause after a hotkey-triggered renderer or game swap
pub const HOTKEY_COOLDOWN_MS: u64 = 200;

/// Wait between closing one backend and initializing the next
pub const RELEASE_DELAY_MS: u64 = 500;

/// Number of `is_open` polls a freshly initialized backend gets
pub const OPEN_POLL_ATTEMPTS: u32 = 5;

/// Delay between two `is_open` polls
pub const OPEN_POLL_INTERVAL_MS: u64 = 200;

/// Delay before re-checking a new backend after its first frame
pub const SETTLE_DELAY_MS: u64 = 500;

/// Poll interval of the end-of-game screen
pub const END_SCREEN_POLL_MS: u64 = 50;

/// Maximum number of rows kept in the high-score table
pub const HIGH_SCORE_CAPACITY: usize = 10;

/// Number of high-score rows shown on the menu
pub const HIGH_SCORE_MENU_ROWS: usize = 5;

/// Discrete input events produced by a renderer's `poll_event`
///
/// Renderers return at most one event per poll; `None` means nothing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Event {
    #[default]
    None,
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Confirm / primary action
    Action,
    Pause,
    /// Return to the menu
    Menu,
    NextRenderer,
    PrevRenderer,
    NextGame,
    PrevGame,
}

impl Event {
    /// Parse event from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use arcade_types::Event;
    ///
    /// assert_eq!(Event::from_str("moveUp"), Some(Event::MoveUp));
    /// assert_eq!(Event::from_str("QUIT"), Some(Event::Quit));
    /// assert_eq!(Event::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Event::None),
            "quit" => Some(Event::Quit),
            "moveup" => Some(Event::MoveUp),
            "movedown" => Some(Event::MoveDown),
            "moveleft" => Some(Event::MoveLeft),
            "moveright" => Some(Event::MoveRight),
            "action" => Some(Event::Action),
            "pause" => Some(Event::Pause),
            "menu" => Some(Event::Menu),
            "nextrenderer" => Some(Event::NextRenderer),
            "prevrenderer" => Some(Event::PrevRenderer),
            "nextgame" => Some(Event::NextGame),
            "prevgame" => Some(Event::PrevGame),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::None => "none",
            Event::Quit => "quit",
            Event::MoveUp => "moveUp",
            Event::MoveDown => "moveDown",
            Event::MoveLeft => "moveLeft",
            Event::MoveRight => "moveRight",
            Event::Action => "action",
            Event::Pause => "pause",
            Event::Menu => "menu",
            Event::NextRenderer => "nextRenderer",
            Event::PrevRenderer => "prevRenderer",
            Event::NextGame => "nextGame",
            Event::PrevGame => "prevGame",
        }
    }

    /// Events handled by the host before any game sees them.
    pub fn is_hotkey(&self) -> bool {
        matches!(
            self,
            Event::Quit
                | Event::Menu
                | Event::NextRenderer
                | Event::PrevRenderer
                | Event::NextGame
                | Event::PrevGame
        )
    }
}

/// Game lifecycle states reported by a game module
///
/// The host mirrors the active game's state; when no game is loaded it
/// behaves as if in `Menu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    Win,
}

impl GameState {
    /// `GameOver` and `Win` end a round.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver | GameState::Win)
    }

    /// Flip between `Playing` and `Paused`; other states are left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcade_types::GameState;
    ///
    /// assert_eq!(GameState::Playing.toggle_pause(), GameState::Paused);
    /// assert_eq!(GameState::Paused.toggle_pause(), GameState::Playing);
    /// assert_eq!(GameState::Win.toggle_pause(), GameState::Win);
    /// ```
    pub fn toggle_pause(self) -> Self {
        match self {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Menu => "menu",
            GameState::Playing => "playing",
            GameState::Paused => "paused",
            GameState::GameOver => "gameOver",
            GameState::Win => "win",
        }
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Point in window space (logical pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A piece of text to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
    pub position: Position,
    pub color: Color,
    /// Font size in logical pixels; text-only backends may ignore it.
    pub size: u32,
}

impl Text {
    /// White 16px text
    pub fn new(content: impl Into<String>, position: Position) -> Self {
        Self {
            content: content.into(),
            position,
            color: Color::WHITE,
            size: 16,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}
