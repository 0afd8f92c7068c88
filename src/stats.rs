//! Lifetime statistics and their on-disk JSON record.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::{APP_DIR_NAME, STATS_FILE_NAME},
    entities::Side,
};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wins {
    pub left: u64,
    pub right: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub games_played: u64,
    pub wins: Wins,
    pub longest_rally: u64,
    /// Number of points played.
    pub total_rallies: u64,
    /// Mean hits per point, rounded.
    pub average_rally: u64,
    pub power_ups_collected: u64,
    /// Never written by the game; whatever is on disk is carried through.
    pub history: Vec<serde_json::Value>,
}

impl Stats {
    pub fn record_rally(&mut self, hits: u32) {
        let hits = u64::from(hits);
        self.longest_rally = self.longest_rally.max(hits);
        let total = self.average_rally * self.total_rallies + hits;
        self.total_rallies += 1;
        self.average_rally = (total as f64 / self.total_rallies as f64).round() as u64;
    }

    pub fn record_match(&mut self, winner: Side) {
        self.games_played += 1;
        match winner {
            Side::Left => self.wins.left += 1,
            Side::Right => self.wins.right += 1,
        }
    }
}

pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/terminal-pong/stats.json`, or the working directory when
    /// the platform has no data dir.
    pub fn default_location() -> Self {
        Self::new(app_dir().join(STATS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record, falling back to zeroed stats when the file is
    /// missing or unreadable.
    pub fn load(&self) -> Stats {
        match self.try_load() {
            Ok(stats) => {
                info!(path = %self.path.display(), games = stats.games_played, "stats loaded");
                stats
            }
            Err(StatsError::Io(err)) if err.kind() == io::ErrorKind::NotFound => Stats::default(),
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring unreadable stats: {err}");
                Stats::default()
            }
        }
    }

    fn try_load(&self) -> Result<Stats, StatsError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, stats: &Stats) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(stats)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Saves and swallows any failure; the game carries on either way.
    pub fn persist(&self, stats: &Stats) {
        if let Err(err) = self.save(stats) {
            warn!(path = %self.path.display(), "failed to save stats: {err}");
        }
    }
}

pub fn app_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}
