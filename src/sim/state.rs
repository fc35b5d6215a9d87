//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything that changes between frames:
//! score, life, level index, viewport, the shared frame counter and every
//! actor container. It is created once and rebuilt in place by `setup`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind};
use super::camera::Viewport;
use super::container::Container;
use super::physics::PhysicsStepper;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::engine::Engine;
use crate::level::{LevelData, LevelError};
use crate::tuning::{LifePolicy, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Life ran out; the next tick restarts from level 1
    GameOver,
    /// The last level was completed
    Won,
}

/// Why the player was sent back to the start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fell below the bottom of the map
    Fell,
    /// Touched a "don't touch" tile
    Hazard,
    /// Hit by an enemy bullet
    Shot,
}

/// Things that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { by_bullet: bool },
    EnemyDestroyed { id: ActorId },
    PlayerFired,
    EnemyFired { enemy: ActorId },
    Bounced,
    PlayerDied { cause: DeathCause },
    LevelComplete { level: u32 },
    GameOver,
    GameWon,
    Restarted,
}

/// Direction the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// The player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    pub facing: Facing,
}

impl Player {
    pub fn new(id: ActorId, start: Vec2) -> Self {
        let mut actor = Actor::player(start);
        actor.id = id;
        Self {
            actor,
            facing: Facing::Right,
        }
    }

    /// Flip facing from the horizontal velocity; standing still keeps it
    pub fn update_facing(&mut self) {
        if self.actor.vel.x < 0.0 {
            self.facing = Facing::Left;
        } else if self.actor.vel.x > 0.0 {
            self.facing = Facing::Right;
        }
    }

    /// Center point bullets are fired from and enemies aim at
    pub fn center(&self) -> Vec2 {
        self.actor.pos
    }
}

/// Every actor container of the loaded level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub walls: Container,
    pub coins: Container,
    pub enemies: Container,
    pub player_bullets: Container,
    pub enemy_bullets: Container,
    pub explosions: Container,
    pub hazards: Container,
    pub bounce_pads: Container,
    pub ladders: Container,
    pub background: Container,
    pub foreground: Container,
}

impl World {
    /// Total number of actors, player excluded
    pub fn actor_count(&self) -> usize {
        [
            &self.walls,
            &self.coins,
            &self.enemies,
            &self.player_bullets,
            &self.enemy_bullets,
            &self.explosions,
            &self.hazards,
            &self.bounce_pads,
            &self.ladders,
            &self.background,
            &self.foreground,
        ]
        .iter()
        .map(|c| c.len())
        .sum()
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance values this run was started with
    pub tuning: Tuning,
    pub score: u32,
    pub life: u32,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    pub viewport: Viewport,
    /// Seconds since the level was set up
    pub total_time: f32,
    /// Right edge of the map; reaching it completes the level
    pub end_of_map: f32,
    /// Shared by every enemy; drives synchronized fire
    pub frame_count: u64,
    pub player: Player,
    pub world: World,
    /// Fire requests (world coordinates) queued by input between frames
    #[serde(default)]
    pub pending_shots: Vec<Vec2>,
    /// Events from the last frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: ActorId,
}

impl GameState {
    /// Create a fresh state with no level loaded
    pub fn new(tuning: Tuning) -> Self {
        let start = tuning.start_position();
        Self {
            score: 0,
            life: tuning.starting_life,
            level: tuning.start_level,
            phase: GamePhase::Playing,
            viewport: Viewport::default(),
            total_time: 0.0,
            end_of_map: 0.0,
            frame_count: 0,
            player: Player::new(1, start),
            world: World::default(),
            pending_shots: Vec::new(),
            events: Vec::new(),
            next_id: 2,
            tuning,
        }
    }

    /// Allocate a new actor id
    pub fn next_entity_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn physics(&self) -> PhysicsStepper {
        PhysicsStepper::new(self.tuning.gravity)
    }

    /// Load `level` and rebuild every container from it.
    ///
    /// The level is fetched and validated before anything is replaced, so a
    /// failed load leaves the current level untouched.
    pub fn setup(&mut self, level: u32, engine: &mut impl Engine) -> Result<(), LevelError> {
        let data = engine.load_level(level)?;
        data.validate(level)?;
        self.install(level, data);
        Ok(())
    }

    fn install(&mut self, level: u32, data: LevelData) {
        self.level = level;
        self.viewport.reset();
        self.total_time = 0.0;
        self.end_of_map = data.end_of_map();
        self.pending_shots.clear();

        if self.tuning.life_policy == LifePolicy::ResetEachLevel {
            self.score = 0;
            self.life = self.tuning.starting_life;
        }

        let player_id = self.next_entity_id();
        self.player = Player::new(player_id, self.tuning.start_position());

        let mut world = World::default();
        self.fill(&mut world.walls, data.walls, ActorKind::Wall);
        self.fill(&mut world.coins, data.coins, ActorKind::Coin);
        self.fill(&mut world.enemies, data.enemies, ActorKind::Enemy);
        self.fill(&mut world.hazards, data.hazards, ActorKind::Hazard);
        self.fill(&mut world.bounce_pads, data.bounce_pads, ActorKind::BouncePad);
        self.fill(&mut world.ladders, data.ladders, ActorKind::Ladder);
        self.fill(&mut world.background, data.background, ActorKind::Decor);
        self.fill(&mut world.foreground, data.foreground, ActorKind::Decor);
        self.world = world;

        log::info!(
            "Level {} ready: {} actors, end of map at {}",
            level,
            self.world.actor_count(),
            self.end_of_map
        );
    }

    fn fill(&mut self, container: &mut Container, actors: Vec<Actor>, kind: ActorKind) {
        for mut actor in actors {
            actor.id = self.next_entity_id();
            actor.kind = kind;
            container.push(actor);
        }
    }

    /// Start over from level 1 with a fresh score and life
    pub fn restart(&mut self, engine: &mut impl Engine) -> Result<(), LevelError> {
        self.setup(1, engine)?;
        self.score = 0;
        self.life = self.tuning.starting_life;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted at level 1");
        Ok(())
    }

    /// Death penalty: lose points and a life, never going below zero
    pub fn apply_penalty(&mut self) {
        self.score = self.score.saturating_sub(DEATH_SCORE_PENALTY);
        self.life = self.life.saturating_sub(1);
    }

    /// Remove a coin and credit it. Returns false if the coin was already gone.
    pub fn collect_coin(&mut self, id: ActorId, by_bullet: bool, engine: &mut impl Engine) -> bool {
        if self.world.coins.remove(id).is_none() {
            return false;
        }
        self.score += 1;
        engine.play_sound(SoundCue::CollectCoin);
        self.events.push(GameEvent::CoinCollected { by_bullet });
        true
    }

    /// Penalize and put the player back at the start of the level
    pub fn respawn(&mut self, cause: DeathCause, engine: &mut impl Engine) {
        self.apply_penalty();
        self.player.actor.pos = self.tuning.start_position();
        self.viewport.reset();
        engine.play_sound(SoundCue::GameOver);
        self.events.push(GameEvent::PlayerDied { cause });
        log::info!(
            "Player died ({:?}): score {}, life {}",
            cause,
            self.score,
            self.life
        );
    }

    /// HUD text: elapsed time, score, life
    pub fn hud(&self) -> [String; 3] {
        let elapsed = self.total_time as u32;
        [
            format!("Time: {:02}:{:02}", elapsed / 60, elapsed % 60),
            format!("Score: {}", self.score),
            format!("Life: {}", self.life),
        ]
    }
}
