//! Whole-frame scenarios run through the public API

use glam::Vec2;
use proptest::prelude::*;

use super_joana::audio::SoundCue;
use super_joana::consts::*;
use super_joana::engine::MemoryEngine;
use super_joana::level::{LevelData, grid_center};
use super_joana::sim::{
    Actor, ActorKind, Container, DeathCause, GameEvent, GamePhase, GameState, tick,
};
use super_joana::Tuning;

fn playing(levels: u32) -> (GameState, MemoryEngine) {
    let mut engine = MemoryEngine::flat(levels);
    let mut state = GameState::new(Tuning::default());
    state.setup(1, &mut engine).unwrap();
    engine.take_sounds();
    (state, engine)
}

/// Put the player on the floor of a flat level at `x`
fn stand_at(state: &mut GameState, x: f32) {
    state.player.actor.set_bottom(GRID_PIXEL_SIZE);
    state.player.actor.pos.x = x;
    state.player.actor.vel = Vec2::ZERO;
}

fn add(state: &mut GameState, kind: ActorKind, pos: Vec2) -> u32 {
    let mut actor = Actor::tile(kind, pos);
    actor.id = state.next_entity_id();
    let id = actor.id;
    let world = &mut state.world;
    let container = match kind {
        ActorKind::Enemy => &mut world.enemies,
        ActorKind::Hazard => &mut world.hazards,
        ActorKind::Coin => &mut world.coins,
        _ => &mut world.walls,
    };
    container.push(actor);
    id
}

#[test]
fn fall_below_map_respawns_with_penalty() {
    let (mut state, mut engine) = playing(1);
    state.score = 5;
    state.life = 3;
    state.player.actor.pos = Vec2::new(400.0, -150.0);
    state.viewport.left = 120.0;
    state.viewport.bottom = 30.0;

    tick(&mut state, FRAME_DT, &mut engine).unwrap();

    assert_eq!(state.score, 2);
    assert_eq!(state.life, 2);
    assert_eq!(state.player.actor.pos, state.tuning.start_position());
    assert_eq!(state.viewport.left, 0.0);
    assert_eq!(state.viewport.bottom, 0.0);
    assert!(engine.sounds.contains(&SoundCue::GameOver));
    assert!(state.events.contains(&GameEvent::PlayerDied {
        cause: DeathCause::Fell
    }));
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn hazard_penalty_floors_at_zero() {
    let (mut state, mut engine) = playing(1);
    state.score = 1;
    state.life = 1;
    stand_at(&mut state, 400.0);
    state.player.actor.vel.x = 3.0;
    add(&mut state, ActorKind::Hazard, Vec2::new(400.0, 96.0));

    tick(&mut state, FRAME_DT, &mut engine).unwrap();

    assert_eq!(state.score, 0);
    assert_eq!(state.life, 0);
    assert_eq!(state.player.actor.vel, Vec2::ZERO);
    assert_eq!(state.phase, GamePhase::GameOver);

    // The next frame starts the game over from level 1
    tick(&mut state, FRAME_DT, &mut engine).unwrap();
    assert_eq!(state.level, 1);
    assert_eq!(state.life, state.tuning.starting_life);
    assert!(state.viewport.is_origin());
}

#[test]
fn enemy_in_range_fires_once_on_period() {
    let (mut state, mut engine) = playing(1);
    stand_at(&mut state, 300.0);
    let player = state.player.actor.pos;
    let enemy = add(&mut state, ActorKind::Enemy, player + Vec2::new(500.0, 300.0));
    state.frame_count = ENEMY_FIRE_PERIOD - 1;

    tick(&mut state, FRAME_DT, &mut engine).unwrap();

    assert_eq!(state.frame_count % ENEMY_FIRE_PERIOD, 0);
    assert_eq!(state.world.enemy_bullets.len(), 1);
    let bullet = state.world.enemy_bullets.iter().next().unwrap();
    assert!(bullet.vel.x < 0.0);
    assert!(bullet.vel.y < 0.0);
    assert!((bullet.vel.length() - state.tuning.bullet_speed).abs() < 1e-3);
    assert_eq!(
        state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyFired { .. }))
            .count(),
        1
    );
    assert!(state.events.contains(&GameEvent::EnemyFired { enemy }));

    // Nothing more until the counter wraps around again
    tick(&mut state, FRAME_DT, &mut engine).unwrap();
    assert_eq!(state.world.enemy_bullets.len(), 1);
}

#[test]
fn enemies_in_range_fire_together() {
    let (mut state, mut engine) = playing(1);
    stand_at(&mut state, 300.0);
    add(&mut state, ActorKind::Enemy, Vec2::new(700.0, 400.0));
    add(&mut state, ActorKind::Enemy, Vec2::new(600.0, 500.0));
    state.frame_count = 2 * ENEMY_FIRE_PERIOD - 1;

    tick(&mut state, FRAME_DT, &mut engine).unwrap();
    assert_eq!(state.world.enemy_bullets.len(), 2);
}

#[test]
fn end_of_map_loads_next_level() {
    let mut next = LevelData::flat(50);
    next.coins.push(Actor::tile(ActorKind::Coin, grid_center(10, 1)));
    let mut engine = MemoryEngine::flat(1).with_level(2, next);
    let mut state = GameState::new(Tuning::default());
    state.setup(1, &mut engine).unwrap();

    state.score = 7;
    let end_of_map = state.end_of_map;
    stand_at(&mut state, end_of_map);
    state.viewport.left = 1800.0;
    let mut bullet = Actor::laser(ActorKind::PlayerBullet, Vec2::new(2200.0, 600.0), 0.8);
    bullet.id = state.next_entity_id();
    state.world.player_bullets.push(bullet);

    tick(&mut state, FRAME_DT, &mut engine).unwrap();

    assert_eq!(state.level, 2);
    assert_eq!(state.world.walls.len(), 50);
    assert_eq!(state.world.coins.len(), 1);
    assert!(state.world.player_bullets.is_empty());
    assert_eq!(state.end_of_map, 50.0 * GRID_PIXEL_SIZE);
    assert!(state.viewport.is_origin());
    assert_eq!(state.player.actor.pos, state.tuning.start_position());
    assert_eq!(state.score, 7);
    assert!(state.events.contains(&GameEvent::LevelComplete { level: 1 }));
}

#[test]
fn coin_is_collected_once() {
    let (mut state, mut engine) = playing(1);
    stand_at(&mut state, 300.0);
    let coin = add(&mut state, ActorKind::Coin, Vec2::new(300.0, 96.0));

    tick(&mut state, FRAME_DT, &mut engine).unwrap();
    assert_eq!(state.score, 1);
    assert!(!state.world.coins.contains(coin));
    assert!(!state.collect_coin(coin, false, &mut engine));

    tick(&mut state, FRAME_DT, &mut engine).unwrap();
    assert_eq!(state.score, 1);
    assert_eq!(
        engine
            .sounds
            .iter()
            .filter(|s| **s == SoundCue::CollectCoin)
            .count(),
        1
    );
}

#[test]
fn bullet_through_coin_is_retired_after_credit() {
    let (mut state, mut engine) = playing(1);
    stand_at(&mut state, 100.0);
    add(&mut state, ActorKind::Coin, Vec2::new(600.0, 400.0));
    state.pending_shots.push(Vec2::new(600.0, 400.0));

    for _ in 0..120 {
        tick(&mut state, FRAME_DT, &mut engine).unwrap();
        if state.world.coins.is_empty() {
            break;
        }
    }

    assert_eq!(state.score, 1);
    assert!(state.world.player_bullets.is_empty());
}

proptest! {
    #[test]
    fn prop_respawn_resets_position_and_view(
        x in 0.0f32..2000.0,
        y in -5000.0f32..-101.0,
        left in -500.0f32..3000.0,
        bottom in -500.0f32..3000.0,
        score in 0u32..20,
        life in 1u32..6,
    ) {
        let (mut state, mut engine) = playing(1);
        state.score = score;
        state.life = life;
        state.player.actor.pos = Vec2::new(x, y);
        state.viewport.left = left;
        state.viewport.bottom = bottom;

        tick(&mut state, FRAME_DT, &mut engine).unwrap();

        prop_assert_eq!(state.player.actor.pos, state.tuning.start_position());
        prop_assert!(state.viewport.is_origin());
        prop_assert_eq!(state.score, score.saturating_sub(DEATH_SCORE_PENALTY));
        prop_assert_eq!(state.life, life - 1);
    }

    #[test]
    fn prop_explosion_cursor_only_grows(updates in 0u32..80) {
        let mut explosions = Container::new();
        explosions.push(Actor::explosion(Vec2::ZERO));
        let mut last = 0;

        for _ in 0..updates {
            super_joana::sim::lifecycle::update_explosions(&mut explosions);
            match explosions.iter().next() {
                Some(e) => {
                    let cursor = e.animation.unwrap().cursor;
                    prop_assert!(cursor > last);
                    prop_assert!(cursor <= EXPLOSION_TEXTURE_COUNT);
                    last = cursor;
                }
                None => {
                    prop_assert_eq!(last, EXPLOSION_TEXTURE_COUNT);
                    break;
                }
            }
        }
    }

    #[test]
    fn prop_score_and_life_stay_in_range(deaths in 0usize..12, coins in 0u32..10) {
        let (mut state, mut engine) = playing(1);
        state.score = coins;
        for _ in 0..deaths {
            state.respawn(DeathCause::Shot, &mut engine);
        }
        prop_assert!(state.life <= state.tuning.starting_life);
        prop_assert_eq!(
            state.life,
            state.tuning.starting_life.saturating_sub(deaths as u32)
        );
        prop_assert!(state.score <= coins);
    }
}
