//! Best score per character, kept in a RON file between runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Receives end-of-round results.
pub trait ScoreSink {
    /// Record `score` for `character`; true if it beat the previous best.
    fn submit(&mut self, character: usize, score: u32) -> bool;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    best: BTreeMap<usize, u32>,
}

/// Per-character best scores, optionally backed by a file.
#[derive(Debug, Default)]
pub struct HighScoreTable {
    path: Option<PathBuf>,
    best: BTreeMap<usize, u32>,
}

impl HighScoreTable {
    /// Table that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing or unreadable file starts an empty table.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match Self::read(&path) {
            Ok(file) => file.best,
            Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("{}, starting with empty high scores", e);
                BTreeMap::new()
            }
        };
        Self { path: Some(path), best }
    }

    fn read(path: &Path) -> Result<ScoreFile, StoreError> {
        let data = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the table out. In-memory tables succeed without touching disk.
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = ScoreFile { best: self.best.clone() };
        let text = ron::ser::to_string_pretty(&file, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })
    }

    pub fn best(&self, character: usize) -> u32 {
        self.best.get(&character).copied().unwrap_or(0)
    }

    /// Highest score across characters, with its owner.
    pub fn best_overall(&self) -> Option<(usize, u32)> {
        self.best
            .iter()
            .map(|(&c, &s)| (c, s))
            .fold(None, |acc, (c, s)| match acc {
                Some((_, top)) if top >= s => acc,
                _ => Some((c, s)),
            })
    }

    /// Characters ordered by best score, highest first.
    pub fn leaderboard(&self) -> Vec<(usize, u32)> {
        let mut rows: Vec<_> = self.best.iter().map(|(&c, &s)| (c, s)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }

    pub fn is_new_best(&self, character: usize, score: u32) -> bool {
        score > self.best(character)
    }

    /// Update the in-memory best. Returns true if `score` beat it.
    pub fn record(&mut self, character: usize, score: u32) -> bool {
        if !self.is_new_best(character, score) {
            return false;
        }
        self.best.insert(character, score);
        true
    }

    pub fn reset(&mut self, character: usize) {
        self.best.remove(&character);
    }

    pub fn reset_all(&mut self) {
        self.best.clear();
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ScoreSink for HighScoreTable {
    fn submit(&mut self, character: usize, score: u32) -> bool {
        if !self.record(character, score) {
            return false;
        }
        log::info!("new best for character {}: {}", character, score);
        if let Err(e) = self.save() {
            log::warn!("high score not saved: {}", e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("holi_range_{}_{}.ron", name, std::process::id()))
    }

    #[test]
    fn highscore_submit_reports_new_best_only() {
        let mut t = HighScoreTable::in_memory();
        assert!(t.submit(0, 120));
        assert!(!t.submit(0, 120));
        assert!(!t.submit(0, 80));
        assert!(t.submit(0, 121));
        assert_eq!(t.best(0), 121);
        assert!(!t.submit(1, 0));
    }

    #[test]
    fn highscore_leaderboard_descending() {
        let mut t = HighScoreTable::in_memory();
        t.submit(0, 50);
        t.submit(1, 200);
        t.submit(2, 90);
        assert_eq!(t.leaderboard(), vec![(1, 200), (2, 90), (0, 50)]);
        assert_eq!(t.best_overall(), Some((1, 200)));
        t.reset(1);
        assert_eq!(t.best_overall(), Some((2, 90)));
        t.reset_all();
        assert_eq!(t.best_overall(), None);
    }

    #[test]
    fn highscore_round_trips_through_file() {
        let path = temp_path("roundtrip");
        let mut t = HighScoreTable::load(&path);
        assert_eq!(t.best(3), 0);
        t.submit(3, 75);
        let reloaded = HighScoreTable::load(&path);
        assert_eq!(reloaded.best(3), 75);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn highscore_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not ron at all {").expect("write");
        let t = HighScoreTable::load(&path);
        assert!(t.leaderboard().is_empty());
        let _ = std::fs::remove_file(&path);
    }
}
