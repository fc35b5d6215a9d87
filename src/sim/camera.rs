//! Viewport scrolling
//!
//! The camera keeps the player's box inside a margin window. Each edge is
//! corrected independently and snaps immediately; offsets are truncated to
//! whole units only on frames where something moved.

use serde::{Deserialize, Serialize};

use super::actor::Aabb;

/// Distance to keep between the player and each screen edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

/// Bottom-left corner of the visible part of the level
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f32,
    pub bottom: f32,
}

impl Viewport {
    pub fn reset(&mut self) {
        self.left = 0.0;
        self.bottom = 0.0;
    }

    pub fn is_origin(&self) -> bool {
        self.left == 0.0 && self.bottom == 0.0
    }

    /// Scroll so `target` sits inside the margin window of a `width` x `height`
    /// screen. Returns whether the viewport moved.
    pub fn follow(&mut self, target: &Aabb, width: f32, height: f32, margins: &Margins) -> bool {
        let mut changed = false;

        let left_boundary = self.left + margins.left;
        if target.left() < left_boundary {
            self.left -= left_boundary - target.left();
            changed = true;
        }

        let right_boundary = self.left + width - margins.right;
        if target.right() > right_boundary {
            self.left += target.right() - right_boundary;
            changed = true;
        }

        let top_boundary = self.bottom + height - margins.top;
        if target.top() > top_boundary {
            self.bottom += target.top() - top_boundary;
            changed = true;
        }

        let bottom_boundary = self.bottom + margins.bottom;
        if target.bottom() < bottom_boundary {
            self.bottom -= bottom_boundary - target.bottom();
            changed = true;
        }

        if changed {
            // Whole units only, so tiles line up with screen pixels
            self.left = self.left.trunc();
            self.bottom = self.bottom.trunc();
        }
        changed
    }

    /// Convert a screen position to world coordinates
    pub fn to_world(&self, screen_x: f32, screen_y: f32) -> glam::Vec2 {
        glam::Vec2::new(screen_x + self.left, screen_y + self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const MARGINS: Margins = Margins {
        left: 250.0,
        right: 250.0,
        bottom: 250.0,
        top: 100.0,
    };

    fn player_box(left: f32, bottom: f32) -> Aabb {
        Aabb::new(Vec2::new(left, bottom), Vec2::new(left + 44.0, bottom + 92.0))
    }

    #[test]
    fn test_no_scroll_inside_window() {
        let mut view = Viewport::default();
        assert!(!view.follow(&player_box(400.0, 300.0), 1000.0, 650.0, &MARGINS));
        assert!(view.is_origin());
    }

    #[test]
    fn test_scroll_right_truncates() {
        let mut view = Viewport::default();
        // right edge 760.5 is 10.5 past the right boundary at 750
        let changed = view.follow(&player_box(716.5, 300.0), 1000.0, 650.0, &MARGINS);
        assert!(changed);
        assert_eq!(view.left, 10.0);
        assert_eq!(view.bottom, 0.0);
    }

    #[test]
    fn test_scroll_up_and_down_are_independent() {
        let mut view = Viewport::default();
        view.follow(&player_box(400.0, 600.0), 1000.0, 650.0, &MARGINS);
        // top 692 - (650 - 100) = 142
        assert_eq!(view.bottom, 142.0);
        assert_eq!(view.left, 0.0);

        view.follow(&player_box(400.0, 100.0), 1000.0, 650.0, &MARGINS);
        // bottom boundary 142 + 250 = 392, player bottom 100
        assert_eq!(view.bottom, -150.0);
    }

    #[test]
    fn test_to_world_adds_offsets() {
        let view = Viewport {
            left: 120.0,
            bottom: 40.0,
        };
        assert_eq!(view.to_world(10.0, 20.0), Vec2::new(130.0, 60.0));
    }
}
