//! Player preferences
//!
//! Persisted as a small JSON file next to the game. A missing or broken file
//! never stops the game; defaults are used instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioBackend, AudioManager};
use crate::tuning::{LifePolicy, Tuning, TuningPreset};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Balance preset the game starts with
    pub preset: TuningPreset,
    /// Full balance table; replaces the preset when present
    pub tuning: Option<Tuning>,
    /// Reset score and life on every level load
    pub reset_each_level: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: TuningPreset::SuperJoana,
            tuning: None,
            reset_each_level: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Balance values to run with
    pub fn tuning(&self) -> Tuning {
        let mut tuning = self.tuning.clone().unwrap_or_else(|| self.preset.tuning());
        if self.reset_each_level {
            tuning.life_policy = LifePolicy::ResetEachLevel;
        }
        tuning
    }

    /// Push the volume preferences into an audio manager
    pub fn apply_audio<B: AudioBackend>(&self, audio: &mut AudioManager<B>) {
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_volume(self.sfx_volume);
        audio.set_muted(self.muted);
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
