//! Persistence
//!
//! Values are stored as JSON strings in a key-value store: LocalStorage in the
//! browser, a map in memory everywhere else.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GameError;

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "circus_highscore";

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError>;
}

/// Read and decode a JSON value; `Ok(None)` if the key is absent
pub fn load_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, GameError> {
    match store.get(key) {
        Some(raw) => Ok(Some(serde_json::from_str(raw.trim())?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), GameError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    /// Number of successful writes
    pub writes: u32,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Where the round owner keeps the high score
pub trait ScoreStore {
    /// Stored high score, 0 if missing or unreadable
    fn load_high_score(&self) -> u32;
    fn save_high_score(&mut self, score: u32) -> Result<(), GameError>;
}

/// High score kept as a plain integer under `HIGH_SCORE_KEY`
#[derive(Debug, Clone, Default)]
pub struct HighScoreStore<K> {
    backend: K,
}

impl<K: KeyValueStore> HighScoreStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }
}

impl<K: KeyValueStore> ScoreStore for HighScoreStore<K> {
    fn load_high_score(&self) -> u32 {
        match load_json::<u32>(&self.backend, HIGH_SCORE_KEY) {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {}", e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), GameError> {
        save_json(&mut self.backend, HIGH_SCORE_KEY, &score)?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}
