//! Super JOANA - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, collisions, game state, camera)
//! - `engine`: Contract the simulation needs from the host engine
//! - `level`: Level data, JSON level directories and procedural demo levels
//! - `audio`: Sound cue ids and the volume-aware sink
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted player preferences
//! - `autopilot`: Scripted input for headless runs

pub mod audio;
pub mod autopilot;
pub mod engine;
pub mod level;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
pub use level::{LevelData, LevelError};
pub use settings::Settings;
pub use tuning::{Tuning, TuningPreset};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame delta the headless runner feeds to `tick` (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 650.0;

    /// Sprite scaling
    pub const CHARACTER_SCALING: f32 = 1.0;
    pub const TILE_SCALING: f32 = 0.5;
    pub const COIN_SCALING: f32 = 0.5;
    pub const SPRITE_LASER_SCALING: f32 = 0.8;
    pub const SPRITE_PIXEL_SIZE: f32 = 128.0;
    /// Size of one map tile in world units
    pub const GRID_PIXEL_SIZE: f32 = SPRITE_PIXEL_SIZE * TILE_SCALING;

    /// Player collision box, relative to the sprite center (unscaled)
    pub const PLAYER_HITBOX_LEFT: f32 = -22.0;
    pub const PLAYER_HITBOX_RIGHT: f32 = 22.0;
    pub const PLAYER_HITBOX_BOTTOM: f32 = -64.0;
    pub const PLAYER_HITBOX_TOP: f32 = 28.0;

    /// Laser sprite (unscaled, horizontal)
    pub const LASER_WIDTH: f32 = 54.0;
    pub const LASER_HEIGHT: f32 = 9.0;

    /// Falling below this height kills the player
    pub const DEATH_Y: f32 = -100.0;
    /// Vertical speed given by a bounce pad
    pub const BOUNCE_SPEED: f32 = 20.0;
    /// Score lost on each death
    pub const DEATH_SCORE_PENALTY: u32 = 3;

    /// Enemies fire when the shared frame counter is a multiple of this
    pub const ENEMY_FIRE_PERIOD: u64 = 90;
    /// Enemies only fire when the player is closer than this on each axis
    pub const ENEMY_FIRE_RANGE_X: f32 = 600.0;
    pub const ENEMY_FIRE_RANGE_Y: f32 = 450.0;

    /// Frames in the explosion spritesheet
    pub const EXPLOSION_TEXTURE_COUNT: u32 = 60;

    /// Probe distance used to test whether the player stands on something
    pub const JUMP_PROBE_DISTANCE: f32 = 2.0;
}

/// Angle (radians) from `from` toward `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let diff = to - from;
    diff.y.atan2(diff.x)
}

/// Travel vector for an angle and a speed
#[inline]
pub fn heading_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}
