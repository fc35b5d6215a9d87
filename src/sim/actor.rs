//! Actors: every positioned, bounded object in a level
//!
//! An actor is a tagged variant: the `kind` decides how the simulation treats
//! it, the rest is shared geometry. Collision boxes are axis aligned and
//! expressed as offsets from the actor's center so the player's asymmetric
//! box fits the same type as a square coin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable identifier, unique within a `GameState`
pub type ActorId = u32;

/// Gameplay category of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Wall,
    Coin,
    Enemy,
    /// "Don't touch" tiles
    Hazard,
    /// Trampoline
    BouncePad,
    Ladder,
    PlayerBullet,
    EnemyBullet,
    Explosion,
    /// Background/foreground decoration, never collides
    Decor,
}

impl ActorKind {
    /// Projectiles orient their collision box along their travel angle
    pub fn is_projectile(self) -> bool {
        matches!(self, ActorKind::PlayerBullet | ActorKind::EnemyBullet)
    }
}

/// Axis aligned bounding box in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap: boxes that only share an edge do not intersect,
    /// so a player resting on a floor is not "inside" it.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn translated(&self, offset: Vec2) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }
}

/// Collision box edges relative to the actor center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Hitbox {
    /// Box centered on the sprite
    pub fn centered(size: Vec2) -> Self {
        Self {
            left: -size.x / 2.0,
            bottom: -size.y / 2.0,
            right: size.x / 2.0,
            top: size.y / 2.0,
        }
    }

    /// Box from base sprite dimensions and a scale
    pub fn scaled(base: Vec2, scale: f32) -> Self {
        Self::centered(base * scale)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.top - self.bottom)
    }
}

/// Explosion animation cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    /// Index of the texture shown, advanced once per update
    pub cursor: u32,
    /// Length of the texture sequence
    pub frames: u32,
}

impl Animation {
    pub fn new(frames: u32) -> Self {
        Self { cursor: 0, frames }
    }

    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    pub fn is_finished(&self) -> bool {
        self.cursor > self.frames
    }
}

/// Any positioned, bounded game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Assigned when the actor enters a container
    #[serde(default)]
    pub id: ActorId,
    pub kind: ActorKind,
    /// Center position
    pub pos: Vec2,
    /// Change per frame
    #[serde(default)]
    pub vel: Vec2,
    pub hitbox: Hitbox,
    /// Facing angle in degrees
    #[serde(default)]
    pub angle: f32,
    /// Patrol bounds (enemies only)
    #[serde(default)]
    pub boundary_left: Option<f32>,
    #[serde(default)]
    pub boundary_right: Option<f32>,
    /// Present on explosions
    #[serde(default)]
    pub animation: Option<Animation>,
}

impl Actor {
    pub fn new(kind: ActorKind, pos: Vec2, hitbox: Hitbox) -> Self {
        Self {
            id: 0,
            kind,
            pos,
            vel: Vec2::ZERO,
            hitbox,
            angle: 0.0,
            boundary_left: None,
            boundary_right: None,
            animation: None,
        }
    }

    /// A map tile of the given kind, centered at `pos`
    pub fn tile(kind: ActorKind, pos: Vec2) -> Self {
        Self::new(
            kind,
            pos,
            Hitbox::scaled(Vec2::splat(SPRITE_PIXEL_SIZE), TILE_SCALING),
        )
    }

    /// The player character at `pos`
    pub fn player(pos: Vec2) -> Self {
        let hitbox = Hitbox {
            left: PLAYER_HITBOX_LEFT * CHARACTER_SCALING,
            bottom: PLAYER_HITBOX_BOTTOM * CHARACTER_SCALING,
            right: PLAYER_HITBOX_RIGHT * CHARACTER_SCALING,
            top: PLAYER_HITBOX_TOP * CHARACTER_SCALING,
        };
        Self::new(ActorKind::Player, pos, hitbox)
    }

    /// A laser bolt of the given projectile kind
    pub fn laser(kind: ActorKind, pos: Vec2, scale: f32) -> Self {
        Self::new(
            kind,
            pos,
            Hitbox::scaled(Vec2::new(LASER_WIDTH, LASER_HEIGHT), scale),
        )
    }

    /// An explosion with a full spritesheet ahead of it
    pub fn explosion(pos: Vec2) -> Self {
        let mut actor = Self::new(
            ActorKind::Explosion,
            pos,
            Hitbox::scaled(Vec2::splat(256.0), 1.0),
        );
        actor.animation = Some(Animation::new(EXPLOSION_TEXTURE_COUNT));
        actor
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_patrol(mut self, left: Option<f32>, right: Option<f32>) -> Self {
        self.boundary_left = left;
        self.boundary_right = right;
        self
    }

    /// World-space collision box.
    ///
    /// Projectiles use the bounding box of their rotated sprite; everything
    /// else ignores `angle`.
    pub fn bounds(&self) -> Aabb {
        let hb = if self.kind.is_projectile() && self.angle != 0.0 {
            let size = self.hitbox.size();
            let (sin, cos) = self.angle.to_radians().sin_cos();
            let extent = Vec2::new(
                cos.abs() * size.x + sin.abs() * size.y,
                sin.abs() * size.x + cos.abs() * size.y,
            );
            Hitbox::centered(extent)
        } else {
            self.hitbox
        };
        Aabb::new(
            Vec2::new(self.pos.x + hb.left, self.pos.y + hb.bottom),
            Vec2::new(self.pos.x + hb.right, self.pos.y + hb.top),
        )
    }

    pub fn left(&self) -> f32 {
        self.pos.x + self.hitbox.left
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.hitbox.right
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.hitbox.bottom
    }

    pub fn top(&self) -> f32 {
        self.pos.y + self.hitbox.top
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x - self.hitbox.left;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.hitbox.right;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.hitbox.bottom;
    }

    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y - self.hitbox.top;
    }

    /// Move by one frame of velocity
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }
}
