use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::WeatherError;

pub const MAX_ENTRIES: usize = 5;

/// Recent successful searches, most recent first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move `query` to the front, dropping the oldest entry past the cap.
    /// Blank queries are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_ENTRIES);
    }
}

/// [`SearchHistory`] bound to a JSON file on disk.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty history.
    pub fn load(&self) -> Result<SearchHistory, WeatherError> {
        if !self.path.exists() {
            return Ok(SearchHistory::default());
        }

        let contents = fs::read_to_string(&self.path)?;
        let mut history: SearchHistory = serde_json::from_str(&contents).map_err(|e| {
            WeatherError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to parse history file {}: {e}", self.path.display()),
            ))
        })?;
        history.entries.truncate(MAX_ENTRIES);
        Ok(history)
    }

    pub fn save(&self, history: &SearchHistory) -> Result<(), WeatherError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(history).map_err(|e| {
            WeatherError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), entries = history.entries.len(), "search history saved");
        Ok(())
    }
}
