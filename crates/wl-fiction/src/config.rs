//! Configuration for a game session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wl_core::GameController;
use wl_core::game::DEFAULT_WIN_ITEM;
use wl_core::world::DEFAULT_START_ROOM;
use wl_data::{LoadMode, LoadOptions};

use crate::error::{FictionError, FictionResult};

/// Configuration for a session. Every field has a default, so a config file
/// only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Directory holding the data files.
    pub data_dir: PathBuf,
    /// Room the player starts in.
    pub start_room: String,
    /// Item needed to win the final fight.
    pub win_item: String,
    /// Refuse to start when the data has problems.
    pub strict: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            start_room: DEFAULT_START_ROOM.to_string(),
            win_item: DEFAULT_WIN_ITEM.to_string(),
            strict: false,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> FictionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> FictionResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| FictionError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the start room.
    pub fn with_start_room(mut self, room: impl Into<String>) -> Self {
        self.start_room = room.into();
        self
    }

    /// Set the win item.
    pub fn with_win_item(mut self, item: impl Into<String>) -> Self {
        self.win_item = item.into();
        self
    }

    /// Turn strict loading on or off.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Options for loading the data directory.
    pub fn load_options(&self) -> LoadOptions {
        let mode = if self.strict {
            LoadMode::Strict
        } else {
            LoadMode::Tolerant
        };
        LoadOptions::default()
            .with_mode(mode)
            .with_start_room(self.start_room.clone())
    }

    /// A game controller using this config's win item.
    pub fn game_controller(&self) -> GameController {
        GameController::new().with_win_item(self.win_item.clone())
    }
}
