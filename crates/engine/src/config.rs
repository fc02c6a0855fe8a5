//! Engine configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH, END_SCREEN_POLL_MS,
    FRAME_SLEEP_MS, HOTKEY_COOLDOWN_MS, MAX_FRAME_DT_SECS, OPEN_POLL_ATTEMPTS,
    OPEN_POLL_INTERVAL_MS, RELEASE_DELAY_MS, SETTLE_DELAY_MS,
};

/// Default module directory, relative to the working directory.
pub const DEFAULT_MODULE_DIR: &str = "./lib";

/// Default high-score file.
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscores.txt";

/// Top-level configuration for the orchestrator.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Directory scanned (recursively) for modules.
    pub module_dir: PathBuf,
    pub high_score_file: PathBuf,
    pub window: WindowConfig,
    pub catalog: ModuleCatalog,
    pub timing: SwapTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            module_dir: PathBuf::from(DEFAULT_MODULE_DIR),
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            window: WindowConfig::default(),
            catalog: ModuleCatalog::default(),
            timing: SwapTiming::default(),
        }
    }
}

impl EngineConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARCADE_MODULE_DIR` - module directory (default: `./lib`)
    /// - `ARCADE_HIGH_SCORES` - high-score file (default: `highscores.txt`)
    /// - `ARCADE_WINDOW_WIDTH` / `ARCADE_WINDOW_HEIGHT` - window size (default: 800x600)
    /// - `ARCADE_WINDOW_TITLE` - window title (default: `Arcade`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("ARCADE_MODULE_DIR") {
            config.module_dir = dir;
        }
        if let Some(file) = read_env::<PathBuf>("ARCADE_HIGH_SCORES") {
            config.high_score_file = file;
        }
        if let Some(width) = read_env::<u32>("ARCADE_WINDOW_WIDTH") {
            config.window.width = width.max(1);
        }
        if let Some(height) = read_env::<u32>("ARCADE_WINDOW_HEIGHT") {
            config.window.height = height.max(1);
        }
        if let Some(title) = read_env::<String>("ARCADE_WINDOW_TITLE") {
            config.window.title = title;
        }

        config
    }
}

/// Window parameters handed to every renderer's `init`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

/// Filename keywords used to classify modules.
///
/// The two sets must be disjoint; renderer keywords are tested first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCatalog {
    pub renderers: Vec<String>,
    pub games: Vec<String>,
}

impl Default for ModuleCatalog {
    fn default() -> Self {
        Self {
            renderers: vec!["arcade_color".to_string(), "arcade_ascii".to_string()],
            games: vec!["arcade_snake".to_string(), "arcade_nibbler".to_string()],
        }
    }
}

impl ModuleCatalog {
    pub fn new<R, G>(renderers: R, games: G) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            renderers: renderers.into_iter().map(Into::into).collect(),
            games: games.into_iter().map(Into::into).collect(),
        }
    }
}

/// Every delay and retry budget used by the swap protocols and main loop.
#[derive(Clone, Debug, PartialEq)]
pub struct SwapTiming {
    /// Wait after closing a backend, before the next one initializes.
    pub release_delay: Duration,
    /// `is_open` polls allowed after `init`.
    pub open_attempts: u32,
    pub open_poll_interval: Duration,
    /// Delay between the transition frame and the liveness re-check.
    pub settle_delay: Duration,
    /// Pause after a hotkey-triggered swap.
    pub hotkey_cooldown: Duration,
    pub end_screen_poll: Duration,
    pub frame_sleep: Duration,
    /// Cap on the delta-time passed to `update`.
    pub max_frame_dt: Duration,
}

impl Default for SwapTiming {
    fn default() -> Self {
        Self {
            release_delay: Duration::from_millis(RELEASE_DELAY_MS),
            open_attempts: OPEN_POLL_ATTEMPTS,
            open_poll_interval: Duration::from_millis(OPEN_POLL_INTERVAL_MS),
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            hotkey_cooldown: Duration::from_millis(HOTKEY_COOLDOWN_MS),
            end_screen_poll: Duration::from_millis(END_SCREEN_POLL_MS),
            frame_sleep: Duration::from_millis(FRAME_SLEEP_MS),
            max_frame_dt: Duration::from_secs_f32(MAX_FRAME_DT_SECS),
        }
    }
}

impl SwapTiming {
    /// Same retry budget, no sleeping. For tests and headless runs.
    pub fn immediate() -> Self {
        Self {
            release_delay: Duration::ZERO,
            open_poll_interval: Duration::ZERO,
            settle_delay: Duration::ZERO,
            hotkey_cooldown: Duration::ZERO,
            end_screen_poll: Duration::ZERO,
            frame_sleep: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
