//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame. Everything that happens
//! in a frame happens here, in a fixed order:
//!
//! 1. player shots queued by input are fired
//! 2. physics moves the player
//! 3. explosions animate, the frame counter advances
//! 4. enemies aim, fire and patrol
//! 5. the player picks up coins, bullets move and resolve
//! 6. death, hazard and bounce-pad rules
//! 7. level completion, game over, camera

use glam::Vec2;

use super::collision::{first_overlap, overlaps};
use super::lifecycle::{
    aim_enemies, fire_player_shots, move_bullets, patrol_enemies, resolve_enemy_bullet_walls,
    resolve_player_bullets, retire_offscreen, update_explosions,
};
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::engine::Engine;
use crate::level::LevelError;

/// Advance the game state by one frame.
///
/// Only a failed level load can fail a tick; the state is left on the level
/// it was on.
pub fn tick(state: &mut GameState, dt: f32, engine: &mut impl Engine) -> Result<(), LevelError> {
    state.events.clear();

    match state.phase {
        GamePhase::GameOver => return state.restart(engine),
        GamePhase::Won => return Ok(()),
        GamePhase::Playing => {}
    }

    state.total_time += dt;

    fire_player_shots(state, engine);

    let stepper = state.physics();
    let report = stepper.step(
        &mut state.player.actor,
        &state.world.walls,
        &state.world.ladders,
    );
    if report.blocked_x || report.blocked_y {
        log::debug!(
            "Player stopped by a wall at ({}, {}), blocked x={} y={}",
            state.player.actor.pos.x,
            state.player.actor.pos.y,
            report.blocked_x,
            report.blocked_y
        );
    }
    state.player.update_facing();

    update_explosions(&mut state.world.explosions);
    state.frame_count += 1;

    aim_enemies(state, engine);
    patrol_enemies(&mut state.world.enemies, &state.world.walls);

    for coin in overlaps(&state.player.actor, &state.world.coins) {
        state.collect_coin(coin, false, engine);
    }

    move_bullets(&mut state.world.enemy_bullets);
    move_bullets(&mut state.world.player_bullets);
    resolve_enemy_bullet_walls(state, engine);
    resolve_player_bullets(state, engine);
    retire_offscreen(&mut state.world.enemy_bullets, &state.viewport);
    retire_offscreen(&mut state.world.player_bullets, &state.viewport);

    let mut view_reset = apply_rules(state, engine);

    if state.player.actor.pos.x >= state.end_of_map {
        let next = state.level + 1;
        if engine.has_level(next) {
            state.setup(next, engine)?;
            state.events.push(GameEvent::LevelComplete { level: next - 1 });
            log::info!("Level {} complete, moving to level {}", next - 1, next);
        } else {
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::GameWon);
            log::info!("Final level {} complete, score {}", state.level, state.score);
        }
        view_reset = true;
    } else if state.life == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("Game over at level {} with score {}", state.level, state.score);
    }

    // The viewport stays at the origin on frames that reset it
    if !view_reset {
        let bounds = state.player.actor.bounds();
        let scrolled =
            state
                .viewport
                .follow(&bounds, SCREEN_WIDTH, SCREEN_HEIGHT, &state.tuning.margins);
        if scrolled {
            log::debug!(
                "Viewport scrolled to ({}, {})",
                state.viewport.left,
                state.viewport.bottom
            );
        }
    }

    Ok(())
}

/// Falling, hazards, bounce pads and enemy fire. Returns whether the player
/// was sent back to the start.
fn apply_rules(state: &mut GameState, engine: &mut impl Engine) -> bool {
    let mut respawned = false;

    if state.player.actor.pos.y < DEATH_Y {
        state.respawn(DeathCause::Fell, engine);
        respawned = true;
    }

    if first_overlap(&state.player.actor, &state.world.hazards).is_some() {
        state.player.actor.vel = Vec2::ZERO;
        state.respawn(DeathCause::Hazard, engine);
        respawned = true;
    }

    if first_overlap(&state.player.actor, &state.world.bounce_pads).is_some() {
        state.player.actor.vel = Vec2::new(0.0, BOUNCE_SPEED);
        state.events.push(GameEvent::Bounced);
    }

    let hits = overlaps(&state.player.actor, &state.world.enemy_bullets);
    if !hits.is_empty() {
        state.world.enemy_bullets.remove_all(&hits);
        engine.play_sound(SoundCue::Gun);
        state.respawn(DeathCause::Shot, engine);
        respawned = true;
    }

    respawned
}
