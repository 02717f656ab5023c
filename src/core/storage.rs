//! # Local Storage
//!
//! A tiny key/value store backing the selected-game hand-off between the search
//! results and the detail page. Each key is one JSON file under the storage
//! directory (`~/.gamefinder/storage/` by default).
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`), so a reader never
//! observes a half-written slot. Slots are overwritten, never deleted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::api::Game;

/// Key of the slot holding the last game the user opened.
pub const SELECTED_GAME_KEY: &str = "selectedGame";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns `~/.gamefinder/storage/`.
    pub fn default_dir() -> io::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        Ok(home.join(".gamefinder").join("storage"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.item_path(key);
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    /// Reads the value under `key`. A missing slot is `Ok(None)`.
    pub fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Writes the full game into the `selectedGame` slot.
pub fn store_selected_game(storage: &LocalStorage, game: &Game) -> io::Result<()> {
    let json =
        serde_json::to_string(game).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    storage.set_item(SELECTED_GAME_KEY, &json)
}

/// Reads the `selectedGame` slot. Malformed JSON is `InvalidData`.
pub fn load_selected_game(storage: &LocalStorage) -> io::Result<Option<Game>> {
    let Some(json) = storage.get_item(SELECTED_GAME_KEY)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
