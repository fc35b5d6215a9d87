//! Projectiles, enemies and explosions
//!
//! Everything here spawns, moves or retires actors that are not the player.
//! Functions run in the order `tick` calls them; ids are collected before any
//! removal so a container is never changed while it is being walked.

use glam::Vec2;

use super::actor::{Actor, ActorId, ActorKind};
use super::camera::Viewport;
use super::collision::{first_overlap, overlaps, overlaps_any};
use super::container::Container;
use super::state::{GameEvent, GameState};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::engine::Engine;
use crate::{angle_between, heading_velocity};

/// A laser bolt leaving `origin` at `angle` (radians)
pub fn spawn_bullet(kind: ActorKind, origin: Vec2, angle: f32, speed: f32, scale: f32) -> Actor {
    let mut bullet = Actor::laser(kind, origin, scale).with_velocity(heading_velocity(angle, speed));
    bullet.angle = angle.to_degrees();
    bullet
}

/// Turn queued fire requests into player bullets
pub fn fire_player_shots(state: &mut GameState, engine: &mut impl Engine) {
    let targets = std::mem::take(&mut state.pending_shots);
    for target in targets {
        let origin = state.player.center();
        let angle = angle_between(origin, target);
        let mut bullet = spawn_bullet(
            ActorKind::PlayerBullet,
            origin,
            angle,
            state.tuning.bullet_speed,
            SPRITE_LASER_SCALING,
        );
        bullet.id = state.next_entity_id();
        state.world.player_bullets.push(bullet);
        engine.play_sound(SoundCue::Gun);
        state.events.push(GameEvent::PlayerFired);
    }
}

/// Advance every explosion one texture and drop the finished ones
pub fn update_explosions(explosions: &mut Container) {
    for explosion in explosions.iter_mut() {
        if let Some(animation) = explosion.animation.as_mut() {
            animation.advance();
        }
    }
    explosions.retain(|e| e.animation.is_some_and(|a| !a.is_finished()));
}

/// Point every enemy at the player and fire from those in range.
///
/// Fire happens only on frames where the shared counter is a multiple of
/// `ENEMY_FIRE_PERIOD`, so all enemies in range shoot together.
pub fn aim_enemies(state: &mut GameState, engine: &mut impl Engine) {
    let target = state.player.center();
    let fire_now = state.frame_count.is_multiple_of(ENEMY_FIRE_PERIOD);

    let mut shots = Vec::new();
    for enemy in state.world.enemies.iter_mut() {
        let diff = target - enemy.pos;
        let angle = diff.y.atan2(diff.x);
        // Enemy sprites face left at rest
        enemy.angle = angle.to_degrees() - 180.0;

        if fire_now && diff.x.abs() < ENEMY_FIRE_RANGE_X && diff.y.abs() < ENEMY_FIRE_RANGE_Y {
            shots.push((enemy.id, enemy.pos, angle));
        }
    }

    for (enemy, origin, angle) in shots {
        let mut bullet = spawn_bullet(
            ActorKind::EnemyBullet,
            origin,
            angle,
            state.tuning.bullet_speed,
            1.0,
        );
        bullet.id = state.next_entity_id();
        state.world.enemy_bullets.push(bullet);
        engine.play_sound(SoundCue::Gun);
        state.events.push(GameEvent::EnemyFired { enemy });
    }
}

/// Move enemies and turn them around at walls and patrol bounds
pub fn patrol_enemies(enemies: &mut Container, walls: &Container) {
    for enemy in enemies.iter_mut() {
        enemy.step();

        let turn = overlaps_any(enemy, walls)
            || enemy.boundary_left.is_some_and(|l| enemy.left() < l)
            || enemy.boundary_right.is_some_and(|r| enemy.right() > r);
        if turn {
            enemy.vel.x = -enemy.vel.x;
        }
    }
}

pub fn move_bullets(bullets: &mut Container) {
    for bullet in bullets.iter_mut() {
        bullet.step();
    }
}

/// Retire enemy bullets that ran into a wall
pub fn resolve_enemy_bullet_walls(state: &mut GameState, engine: &mut impl Engine) {
    let spent: Vec<ActorId> = state
        .world
        .enemy_bullets
        .iter()
        .filter(|b| overlaps_any(b, &state.world.walls))
        .map(|b| b.id)
        .collect();

    for _ in 0..state.world.enemy_bullets.remove_all(&spent) {
        engine.play_sound(SoundCue::Gun);
    }
}

/// Resolve player bullets against walls, coins, enemies and bounce pads.
///
/// Every category is matched against the same bullet before anything is
/// removed, so one bullet can credit coins and destroy enemies while it also
/// grazes a wall. The bullet is retired once if it touched anything.
pub fn resolve_player_bullets(state: &mut GameState, engine: &mut impl Engine) {
    for id in state.world.player_bullets.ids() {
        let Some(bullet) = state.world.player_bullets.get(id).cloned() else {
            continue;
        };

        let hit_wall = overlaps_any(&bullet, &state.world.walls);
        let coins = overlaps(&bullet, &state.world.coins);
        let enemies = overlaps(&bullet, &state.world.enemies);
        let hit_pad = first_overlap(&bullet, &state.world.bounce_pads).is_some();

        if !(hit_wall || hit_pad || !coins.is_empty() || !enemies.is_empty()) {
            continue;
        }
        state.world.player_bullets.remove(id);

        if hit_wall {
            engine.play_sound(SoundCue::Gun);
        }

        if !coins.is_empty() {
            engine.play_sound(SoundCue::Gun);
            for coin in coins {
                state.collect_coin(coin, true, engine);
            }
        }

        if let Some(&first) = enemies.first() {
            if let Some(target) = state.world.enemies.get(first) {
                let mut explosion = Actor::explosion(target.pos);
                explosion.id = state.next_entity_id();
                if let Some(animation) = explosion.animation.as_mut() {
                    animation.advance();
                }
                state.world.explosions.push(explosion);
            }
            engine.play_sound(SoundCue::Gun);
            for enemy in enemies {
                if state.world.enemies.remove(enemy).is_some() {
                    engine.play_sound(SoundCue::Hit);
                    state.events.push(GameEvent::EnemyDestroyed { id: enemy });
                }
            }
        }
    }
}

/// Whether `actor` is still inside the playfield seen from `viewport`
pub fn in_playfield(actor: &Actor, viewport: &Viewport) -> bool {
    let bounds = actor.bounds();
    !(bounds.bottom() > viewport.bottom + SCREEN_HEIGHT
        || bounds.top() < 0.0
        || bounds.right() < 0.0
        || bounds.left() > viewport.left + SCREEN_WIDTH)
}

/// Drop bullets that left the playfield
pub fn retire_offscreen(bullets: &mut Container, viewport: &Viewport) {
    bullets.retain(|b| in_playfield(b, viewport));
}
