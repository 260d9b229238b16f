//! Audio preferences
//!
//! Persisted separately from progression, under its own storage key.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, StorageError};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects on/off
    pub sound_on: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            master_volume: 0.8,
            sfx_volume: 0.7,
        }
    }
}

/// Changes the settings panel can request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingsCommand {
    ToggleSound,
    SetMasterVolume { volume: f32 },
    SetSfxVolume { volume: f32 },
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "frog_rage_settings";

    /// Gain applied to every sound effect
    pub fn effective_volume(&self) -> f32 {
        if self.sound_on {
            self.master_volume * self.sfx_volume
        } else {
            0.0
        }
    }

    /// Apply a settings change; returns false if nothing changed
    pub fn apply(&mut self, command: SettingsCommand) -> bool {
        let before = self.clone();
        match command {
            SettingsCommand::ToggleSound => self.sound_on = !self.sound_on,
            SettingsCommand::SetMasterVolume { volume } => {
                if let Some(v) = clamp_volume(volume) {
                    self.master_volume = v;
                }
            }
            SettingsCommand::SetSfxVolume { volume } => {
                if let Some(v) = clamp_volume(volume) {
                    self.sfx_volume = v;
                }
            }
        }
        *self != before
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.master_volume = clamp_volume(settings.master_volume).unwrap_or(0.8);
                    settings.sfx_volume = clamp_volume(settings.sfx_volume).unwrap_or(0.7);
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn clamp_volume(volume: f32) -> Option<f32> {
    volume.is_finite().then(|| volume.clamp(0.0, 1.0))
}
