//! Bounded leaderboard, one row per game name.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::types::HIGH_SCORE_CAPACITY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Best score per game, sorted descending, at most [`HIGH_SCORE_CAPACITY`] rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `score` for `name`, keeping the larger of the stored and new value.
    pub fn update(&mut self, name: &str, score: u32) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.score = entry.score.max(score),
            None => self.entries.push(HighScoreEntry::new(name, score)),
        }
        // Stable: ties keep insertion order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_CAPACITY);
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn best(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `name score` line per entry.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{} {}", entry.name, entry.score);
        }
        out
    }

    /// Parse `name score` lines. Malformed lines are skipped.
    ///
    /// Names may contain spaces; the score is the last whitespace-separated field.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed = line
                .rsplit_once(char::is_whitespace)
                .and_then(|(name, score)| Some((name.trim_end(), score.parse::<u32>().ok()?)));
            match parsed {
                Some((name, score)) if !name.is_empty() => table.update(name, score),
                _ => warn!("skipping malformed high-score line {}: {:?}", lineno + 1, line),
            }
        }
        table
    }

    /// Rewrite `path` with the whole table.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_text())?;
        debug!("saved {} high score(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Read `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let table = Self::parse(&text);
                debug!("loaded {} high score(s) from {}", table.len(), path.display());
                Ok(table)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }
}
