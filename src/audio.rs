//! Sound cues and the volume-aware audio sink
//!
//! The simulation only names cues; playback belongs to whatever backend the
//! host plugs in. Playing a cue is fire-and-forget.

use serde::{Deserialize, Serialize};

/// Sound effect ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Coin picked up, by the player or a bullet
    CollectCoin,
    /// Player left the ground
    Jump,
    /// Player died and was sent back to the start
    GameOver,
    /// Laser fired or a laser hit something
    Gun,
    /// Enemy destroyed
    Hit,
}

impl SoundCue {
    /// Resource path of the sample for this cue
    pub fn resource(&self) -> &'static str {
        match self {
            SoundCue::CollectCoin => ":resources:sounds/coin1.wav",
            SoundCue::Jump => ":resources:sounds/jump1.wav",
            SoundCue::GameOver => ":resources:sounds/gameover1.wav",
            SoundCue::Gun => ":resources:sounds/laser1.wav",
            SoundCue::Hit => ":resources:sounds/explosion2.wav",
        }
    }
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Backend for headless runs: writes each cue to the debug log
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("sound {:?} ({}) at {:.2}", cue, cue.resource(), volume);
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager<B = LogBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager<LogBackend> {
    fn default() -> Self {
        Self::new(LogBackend)
    }
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(cue, vol);
        self.played += 1;
    }

    /// Number of cues that reached the backend
    pub fn played(&self) -> u64 {
        self.played
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
