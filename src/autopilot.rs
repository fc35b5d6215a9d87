//! Autopilot: plays the game for headless demo runs
//!
//! Walks right, jumps over walls, gaps and hazards, and shoots the closest
//! enemy in range every so often. A little seeded noise keeps runs from
//! looking identical while staying reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::actor::Aabb;
use crate::sim::collision::overlaps_box;
use crate::sim::input::{Action, InputEvent};
use crate::sim::physics::can_jump;
use crate::sim::state::{GamePhase, GameState};

/// Frames between two shots
const FIRE_INTERVAL: u64 = 45;
/// How far ahead of the player walls and gaps are looked for
const LOOK_AHEAD: f32 = 40.0;

/// Scripted input source
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    frames: u64,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
        }
    }

    /// Input events for the coming frame
    pub fn plan(&mut self, state: &GameState) -> Vec<InputEvent> {
        if state.phase != GamePhase::Playing {
            return Vec::new();
        }
        self.frames += 1;

        let mut events = Vec::new();
        let player = &state.player.actor;

        if player.vel.x <= 0.0 {
            events.push(InputEvent::KeyDown(Action::Right));
        }

        if can_jump(player, &state.world.walls) {
            let bounds = player.bounds();
            let ahead = bounds.translated(Vec2::new(LOOK_AHEAD, 0.0));
            let below_ahead = Aabb::new(
                Vec2::new(bounds.right() + 4.0, bounds.bottom() - GRID_PIXEL_SIZE / 2.0),
                Vec2::new(bounds.right() + LOOK_AHEAD, bounds.bottom() - 1.0),
            );

            let wall_ahead = !overlaps_box(&ahead, &state.world.walls).is_empty();
            let gap_ahead = overlaps_box(&below_ahead, &state.world.walls).is_empty();
            let hazard_ahead = !overlaps_box(&below_ahead, &state.world.hazards).is_empty()
                || !overlaps_box(&ahead, &state.world.hazards).is_empty();

            if wall_ahead || gap_ahead || hazard_ahead || self.rng.random_bool(0.02) {
                events.push(InputEvent::KeyDown(Action::Up));
            }
        }

        let target = if self.frames.is_multiple_of(FIRE_INTERVAL) {
            closest_enemy(state)
        } else {
            None
        };
        if let Some(target) = target {
            let jitter = Vec2::new(
                self.rng.random_range(-8.0..8.0),
                self.rng.random_range(-8.0..8.0),
            );
            let screen = target - Vec2::new(state.viewport.left, state.viewport.bottom) + jitter;
            events.push(InputEvent::PointerClick {
                x: screen.x,
                y: screen.y,
            });
        }

        events
    }
}

/// Position of the nearest enemy within firing range of the player
fn closest_enemy(state: &GameState) -> Option<Vec2> {
    let origin = state.player.center();
    state
        .world
        .enemies
        .iter()
        .map(|e| e.pos)
        .filter(|pos| {
            let diff = *pos - origin;
            diff.x.abs() < ENEMY_FIRE_RANGE_X && diff.y.abs() < ENEMY_FIRE_RANGE_Y
        })
        .min_by(|a, b| {
            a.distance_squared(origin)
                .partial_cmp(&b.distance_squared(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;
    use crate::sim::actor::{Actor, ActorKind};
    use crate::sim::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_autopilot_walks_right() {
        let mut engine = MemoryEngine::flat(1);
        let mut state = GameState::new(Tuning::default());
        state.setup(1, &mut engine).unwrap();

        let mut pilot = Autopilot::new(3);
        let events = pilot.plan(&state);
        assert!(events.contains(&InputEvent::KeyDown(Action::Right)));
    }

    #[test]
    fn test_autopilot_jumps_at_wall() {
        let mut engine = MemoryEngine::flat(1);
        let mut state = GameState::new(Tuning::default());
        state.setup(1, &mut engine).unwrap();
        state.player.actor.set_bottom(64.0);
        state.player.actor.pos.x = 300.0;
        state.player.actor.vel.x = 3.0;
        let mut wall = Actor::tile(ActorKind::Wall, Vec2::new(360.0, 96.0));
        wall.id = state.next_entity_id();
        state.world.walls.push(wall);

        let mut pilot = Autopilot::new(3);
        assert!(pilot.plan(&state).contains(&InputEvent::KeyDown(Action::Up)));
    }

    #[test]
    fn test_autopilot_is_reproducible() {
        let run = |seed: u64| {
            let data = crate::level::generate_level(1, 5);
            let mut engine = MemoryEngine::new().with_level(1, data);
            let mut state = GameState::new(Tuning::default());
            state.setup(1, &mut engine).unwrap();
            let mut pilot = Autopilot::new(seed);
            for _ in 0..600 {
                for event in pilot.plan(&state) {
                    crate::sim::handle_input(&mut state, event, &mut engine);
                }
                tick(&mut state, FRAME_DT, &mut engine).unwrap();
            }
            (state.player.actor.pos, state.score, state.life)
        };
        assert_eq!(run(11), run(11));
    }
}
