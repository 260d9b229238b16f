//! Progression that survives page reloads
//!
//! Two entries in the key-value store:
//! - `frog_rage_high_score`: decimal integer
//! - `frog_rage_unlocked_skins`: JSON array of skin names
//!
//! Loading never fails. Missing or malformed entries fall back to a high
//! score of 0 and only the default skin.

use serde_json::Value;

use crate::platform::{KeyValueStore, StorageError};
use crate::sim::{GameState, Skin};

pub const HIGH_SCORE_KEY: &str = "frog_rage_high_score";
pub const UNLOCKED_SKINS_KEY: &str = "frog_rage_unlocked_skins";

/// Persisted slice of the game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub high_score: u64,
    /// Always contains `Skin::Default`, no duplicates
    pub unlocked_skins: Vec<Skin>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            high_score: 0,
            unlocked_skins: vec![Skin::Default],
        }
    }
}

impl Progress {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            high_score: state.high_score,
            unlocked_skins: normalize_skins(state.unlocked_skins.iter().copied()),
        }
    }

    /// Seed a freshly constructed state with loaded progression
    pub fn restore(&self, state: &mut GameState) {
        state.high_score = state.high_score.max(self.high_score);
        state.unlocked_skins = normalize_skins(
            state
                .unlocked_skins
                .iter()
                .chain(self.unlocked_skins.iter())
                .copied(),
        );
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let high_score = match store.get(HIGH_SCORE_KEY) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|e| {
                log::warn!("Ignoring malformed high score {:?}: {}", raw, e);
                0
            }),
            None => 0,
        };

        let unlocked_skins = match store.get(UNLOCKED_SKINS_KEY) {
            Some(raw) => parse_skins(&raw),
            None => Vec::new(),
        };

        let progress = Self {
            high_score,
            unlocked_skins: normalize_skins(unlocked_skins),
        };
        log::info!(
            "Loaded progress: high score {}, {} skins",
            progress.high_score,
            progress.unlocked_skins.len()
        );
        progress
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(HIGH_SCORE_KEY, &self.high_score.to_string())?;
        let skins = serde_json::to_string(&self.unlocked_skins)?;
        store.set(UNLOCKED_SKINS_KEY, &skins)?;
        log::debug!("Progress saved");
        Ok(())
    }
}

/// Keep the recognizable skin names of a JSON array
fn parse_skins(raw: &str) -> Vec<Skin> {
    let values: Vec<Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("Ignoring malformed unlocked skins {:?}: {}", raw, e);
            return Vec::new();
        }
    };
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Skin>(value.clone()) {
            Ok(skin) => Some(skin),
            Err(_) => {
                log::warn!("Dropping unknown skin {}", value);
                None
            }
        })
        .collect()
}

/// Default skin first, then first occurrence of each other skin
fn normalize_skins(skins: impl IntoIterator<Item = Skin>) -> Vec<Skin> {
    let mut out = vec![Skin::Default];
    for skin in skins {
        if !out.contains(&skin) {
            out.push(skin);
        }
    }
    out
}
