//! Contract between the simulation and the host engine
//!
//! The simulation asks the engine for two things: level data and sound
//! playback. Collision and physics are done in `sim` itself.

use std::collections::BTreeMap;

use crate::audio::{AudioBackend, AudioManager, LogBackend, SoundCue};
use crate::level::{LevelData, LevelDirectory, LevelError, generate_level};

/// Services the simulation needs from its host
pub trait Engine {
    /// Fetch the data for `level` (1-based)
    fn load_level(&mut self, level: u32) -> Result<LevelData, LevelError>;

    /// Whether `level` exists; finishing the last level wins the game
    fn has_level(&self, level: u32) -> bool;

    /// Fire-and-forget sound playback
    fn play_sound(&mut self, cue: SoundCue);
}

/// Where a headless engine gets its levels from
#[derive(Debug, Clone)]
pub enum LevelSource {
    /// `level_<n>.json` files
    Directory(LevelDirectory),
    /// Seeded procedural levels `1..=count`
    Generated { seed: u64, count: u32 },
}

impl LevelSource {
    pub fn load(&self, level: u32) -> Result<LevelData, LevelError> {
        match self {
            LevelSource::Directory(dir) => dir.load(level),
            LevelSource::Generated { seed, count } => {
                if level == 0 || level > *count {
                    return Err(LevelError::NotFound(level));
                }
                Ok(generate_level(level, *seed))
            }
        }
    }

    pub fn contains(&self, level: u32) -> bool {
        match self {
            LevelSource::Directory(dir) => dir.contains(level),
            LevelSource::Generated { count, .. } => (1..=*count).contains(&level),
        }
    }
}

/// Engine for native runs without a window
#[derive(Debug)]
pub struct HeadlessEngine<B = LogBackend> {
    pub levels: LevelSource,
    pub audio: AudioManager<B>,
}

impl HeadlessEngine<LogBackend> {
    pub fn new(levels: LevelSource) -> Self {
        Self {
            levels,
            audio: AudioManager::default(),
        }
    }
}

impl<B: AudioBackend> Engine for HeadlessEngine<B> {
    fn load_level(&mut self, level: u32) -> Result<LevelData, LevelError> {
        self.levels.load(level)
    }

    fn has_level(&self, level: u32) -> bool {
        self.levels.contains(level)
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }
}

/// Engine backed by levels held in memory; records every sound cue
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    pub levels: BTreeMap<u32, LevelData>,
    pub sounds: Vec<SoundCue>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: u32, data: LevelData) -> Self {
        self.levels.insert(level, data);
        self
    }

    /// Levels `1..=count`, each a 40-tile flat floor
    pub fn flat(count: u32) -> Self {
        (1..=count).fold(Self::new(), |engine, level| {
            engine.with_level(level, LevelData::flat(40))
        })
    }

    /// Drop recorded cues, returning them
    pub fn take_sounds(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sounds)
    }
}

impl Engine for MemoryEngine {
    fn load_level(&mut self, level: u32) -> Result<LevelData, LevelError> {
        self.levels
            .get(&level)
            .cloned()
            .ok_or(LevelError::NotFound(level))
    }

    fn has_level(&self, level: u32) -> bool {
        self.levels.contains_key(&level)
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }
}
