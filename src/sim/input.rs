//! Player input
//!
//! Input arrives between frames. Key events change the player's velocity
//! right away; clicks are queued and turned into bullets by the next tick.

use serde::{Deserialize, Serialize};

use super::physics::{can_jump, is_on_ladder};
use super::state::{GamePhase, GameState};
use crate::audio::SoundCue;
use crate::engine::Engine;

/// Movement directions, whatever keys the host maps to them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

/// One input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Action),
    KeyUp(Action),
    /// Click in screen coordinates
    PointerClick { x: f32, y: f32 },
}

/// Apply an input event to the player
pub fn handle_input(state: &mut GameState, event: InputEvent, engine: &mut impl Engine) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let speed = state.tuning.movement_speed;
    let on_ladder = is_on_ladder(&state.player.actor, &state.world.ladders);
    let player = &mut state.player.actor;

    match event {
        InputEvent::KeyDown(Action::Up) => {
            if on_ladder {
                player.vel.y = speed;
            } else if can_jump(player, &state.world.walls) {
                player.vel.y = state.tuning.jump_speed;
                engine.play_sound(SoundCue::Jump);
            }
        }
        InputEvent::KeyDown(Action::Down) => {
            if on_ladder {
                player.vel.y = -speed;
            }
        }
        InputEvent::KeyDown(Action::Left) => player.vel.x = -speed,
        InputEvent::KeyDown(Action::Right) => player.vel.x = speed,
        InputEvent::KeyUp(Action::Up | Action::Down) => {
            if on_ladder {
                player.vel.y = 0.0;
            }
        }
        InputEvent::KeyUp(Action::Left | Action::Right) => player.vel.x = 0.0,
        InputEvent::PointerClick { x, y } => {
            let target = state.viewport.to_world(x, y);
            state.pending_shots.push(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;
    use crate::sim::actor::{Actor, ActorKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn standing_state() -> (GameState, MemoryEngine) {
        let mut engine = MemoryEngine::flat(1);
        let mut state = GameState::new(Tuning::default());
        state.setup(1, &mut engine).unwrap();
        // Feet exactly on the floor top at y = 64
        state.player.actor.set_bottom(64.0);
        state.player.actor.pos.x = 300.0;
        (state, engine)
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (mut state, mut engine) = standing_state();
        handle_input(&mut state, InputEvent::KeyDown(Action::Up), &mut engine);
        assert_eq!(state.player.actor.vel.y, state.tuning.jump_speed);
        assert_eq!(engine.take_sounds(), vec![SoundCue::Jump]);

        state.player.actor.vel.y = 0.0;
        state.player.actor.pos.y += 200.0;
        handle_input(&mut state, InputEvent::KeyDown(Action::Up), &mut engine);
        assert_eq!(state.player.actor.vel.y, 0.0);
        assert!(engine.sounds.is_empty());
    }

    #[test]
    fn test_walk_and_stop() {
        let (mut state, mut engine) = standing_state();
        handle_input(&mut state, InputEvent::KeyDown(Action::Left), &mut engine);
        assert_eq!(state.player.actor.vel.x, -state.tuning.movement_speed);
        handle_input(&mut state, InputEvent::KeyUp(Action::Left), &mut engine);
        assert_eq!(state.player.actor.vel.x, 0.0);
    }

    #[test]
    fn test_ladder_climb() {
        let (mut state, mut engine) = standing_state();
        let mut ladder = Actor::tile(ActorKind::Ladder, Vec2::new(300.0, 96.0));
        ladder.id = state.next_entity_id();
        state.world.ladders.push(ladder);

        handle_input(&mut state, InputEvent::KeyDown(Action::Up), &mut engine);
        assert_eq!(state.player.actor.vel.y, state.tuning.movement_speed);
        assert!(engine.sounds.is_empty());

        handle_input(&mut state, InputEvent::KeyUp(Action::Up), &mut engine);
        assert_eq!(state.player.actor.vel.y, 0.0);

        handle_input(&mut state, InputEvent::KeyDown(Action::Down), &mut engine);
        assert_eq!(state.player.actor.vel.y, -state.tuning.movement_speed);
    }

    #[test]
    fn test_click_queues_world_target() {
        let (mut state, mut engine) = standing_state();
        state.viewport.left = 100.0;
        state.viewport.bottom = 50.0;
        handle_input(
            &mut state,
            InputEvent::PointerClick { x: 10.0, y: 20.0 },
            &mut engine,
        );
        assert_eq!(state.pending_shots, vec![Vec2::new(110.0, 70.0)]);
    }
}
