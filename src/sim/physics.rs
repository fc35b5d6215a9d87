//! Platformer physics for the player
//!
//! One step applies gravity (unless the player is on a ladder), then moves the
//! player vertically and horizontally, pushing it back out of any wall it ends
//! up overlapping. Vertical motion is resolved first so that a player walking
//! along a floor never snags on the tiles under its feet.

use glam::Vec2;

use super::actor::Actor;
use super::collision::{overlaps, overlaps_any, overlaps_box};
use super::container::Container;
use crate::consts::JUMP_PROBE_DISTANCE;

/// Outcome of one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Player stands on a wall after the step
    pub can_jump: bool,
    /// Player overlaps a ladder after the step
    pub on_ladder: bool,
    /// Vertical movement was stopped by a wall
    pub blocked_y: bool,
    /// Horizontal movement was stopped by a wall
    pub blocked_x: bool,
}

/// Moves the player against solid walls and climbable ladders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsStepper {
    pub gravity: f32,
}

impl PhysicsStepper {
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }

    /// Advance the player one frame
    pub fn step(&self, player: &mut Actor, walls: &Container, ladders: &Container) -> StepReport {
        if !is_on_ladder(player, ladders) {
            player.vel.y -= self.gravity;
        }

        let blocked_y = move_vertically(player, walls);
        let blocked_x = move_horizontally(player, walls);

        StepReport {
            can_jump: can_jump(player, walls),
            on_ladder: is_on_ladder(player, ladders),
            blocked_y,
            blocked_x,
        }
    }
}

/// True iff the player is supported by a wall directly beneath it
pub fn can_jump(player: &Actor, walls: &Container) -> bool {
    let probe = player
        .bounds()
        .translated(Vec2::new(0.0, -JUMP_PROBE_DISTANCE));
    !overlaps_box(&probe, walls).is_empty()
}

/// True iff the player overlaps any ladder
pub fn is_on_ladder(player: &Actor, ladders: &Container) -> bool {
    overlaps_any(player, ladders)
}

fn move_vertically(player: &mut Actor, walls: &Container) -> bool {
    player.pos.y += player.vel.y;

    let hits = overlaps(player, walls);
    if hits.is_empty() {
        return false;
    }

    let hit_walls = hits.iter().filter_map(|&id| walls.get(id));
    if player.vel.y > 0.0 {
        let ceiling = hit_walls.map(Actor::bottom).fold(f32::INFINITY, f32::min);
        player.set_top(ceiling);
    } else if player.vel.y < 0.0 {
        let floor = hit_walls.map(Actor::top).fold(f32::NEG_INFINITY, f32::max);
        player.set_bottom(floor);
    } else {
        push_out(player, hit_walls);
    }
    player.vel.y = 0.0;
    true
}

/// Move a player that overlaps walls without vertical motion (spawned inside
/// a tile, or held still by a ladder) out along the shallowest side
fn push_out<'a>(player: &mut Actor, hit_walls: impl Iterator<Item = &'a Actor>) {
    let (mut top, mut bottom) = (f32::NEG_INFINITY, f32::INFINITY);
    let (mut right, mut left) = (f32::NEG_INFINITY, f32::INFINITY);
    for wall in hit_walls {
        top = top.max(wall.top());
        bottom = bottom.min(wall.bottom());
        right = right.max(wall.right());
        left = left.min(wall.left());
    }

    let up = top - player.bottom();
    let down = player.top() - bottom;
    let to_right = right - player.left();
    let to_left = player.right() - left;
    let shallowest = up.min(down).min(to_right).min(to_left);

    if shallowest == up {
        player.set_bottom(top);
    } else if shallowest == down {
        player.set_top(bottom);
    } else if shallowest == to_right {
        player.set_left(right);
    } else {
        player.set_right(left);
    }
}

fn move_horizontally(player: &mut Actor, walls: &Container) -> bool {
    player.pos.x += player.vel.x;

    let hits = overlaps(player, walls);
    if hits.is_empty() {
        return false;
    }

    let hit_walls = hits.iter().filter_map(|&id| walls.get(id));
    if player.vel.x > 0.0 {
        let edge = hit_walls.map(Actor::left).fold(f32::INFINITY, f32::min);
        player.set_right(edge);
    } else if player.vel.x < 0.0 {
        let edge = hit_walls.map(Actor::right).fold(f32::NEG_INFINITY, f32::max);
        player.set_left(edge);
    }
    true
}
