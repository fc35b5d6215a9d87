//! Level data
//!
//! A level is a set of actor layers plus the map width. Levels come either
//! from JSON files (`level_<n>.json`, tiles placed on the 64-unit grid) or
//! from the seeded generator used for demos and tests.

use std::path::{Path, PathBuf};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::actor::{Actor, ActorKind};

/// Level loading failures
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level {0} not found")]
    NotFound(u32),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("level {level} is invalid: {reason}")]
    Invalid { level: u32, reason: String },
}

/// Everything the simulation needs to build a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    /// Map width in tiles
    pub map_width: u32,
    pub walls: Vec<Actor>,
    pub coins: Vec<Actor>,
    pub enemies: Vec<Actor>,
    pub hazards: Vec<Actor>,
    pub bounce_pads: Vec<Actor>,
    pub ladders: Vec<Actor>,
    pub background: Vec<Actor>,
    pub foreground: Vec<Actor>,
}

impl LevelData {
    /// Right edge of the map in world units
    pub fn end_of_map(&self) -> f32 {
        self.map_width as f32 * GRID_PIXEL_SIZE
    }

    /// Reject levels the simulation cannot run
    pub fn validate(&self, level: u32) -> Result<(), LevelError> {
        if self.map_width == 0 {
            return Err(LevelError::Invalid {
                level,
                reason: "map width is zero".into(),
            });
        }
        if self.walls.is_empty() {
            return Err(LevelError::Invalid {
                level,
                reason: "ground layer is empty".into(),
            });
        }
        Ok(())
    }

    /// A floor of ground tiles across the whole map and nothing else
    pub fn flat(map_width: u32) -> Self {
        Self {
            map_width,
            walls: (0..map_width as i32)
                .map(|col| grid_tile(ActorKind::Wall, col, 0))
                .collect(),
            ..Default::default()
        }
    }
}

/// Center of a grid cell; row 0 is the bottom of the map
pub fn grid_center(col: i32, row: i32) -> Vec2 {
    Vec2::new(
        col as f32 * GRID_PIXEL_SIZE + GRID_PIXEL_SIZE / 2.0,
        row as f32 * GRID_PIXEL_SIZE + GRID_PIXEL_SIZE / 2.0,
    )
}

fn grid_tile(kind: ActorKind, col: i32, row: i32) -> Actor {
    Actor::tile(kind, grid_center(col, row))
}

/// One tile in a level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub col: i32,
    pub row: i32,
    /// Initial horizontal speed (enemies)
    #[serde(default)]
    pub change_x: f32,
    #[serde(default)]
    pub boundary_left: Option<f32>,
    #[serde(default)]
    pub boundary_right: Option<f32>,
}

/// On-disk level format. Only `ground` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub map_width: u32,
    pub ground: Vec<TilePlacement>,
    #[serde(default)]
    pub coins: Vec<TilePlacement>,
    #[serde(default)]
    pub enemies: Vec<TilePlacement>,
    #[serde(default)]
    pub dont_touch: Vec<TilePlacement>,
    #[serde(default)]
    pub trampolines: Vec<TilePlacement>,
    #[serde(default)]
    pub ladders: Vec<TilePlacement>,
    #[serde(default)]
    pub background: Vec<TilePlacement>,
    #[serde(default)]
    pub foreground: Vec<TilePlacement>,
}

impl LevelFile {
    pub fn into_level(self) -> LevelData {
        let layer = |tiles: Vec<TilePlacement>, kind: ActorKind| -> Vec<Actor> {
            tiles
                .into_iter()
                .map(|t| {
                    grid_tile(kind, t.col, t.row)
                        .with_velocity(Vec2::new(t.change_x, 0.0))
                        .with_patrol(t.boundary_left, t.boundary_right)
                })
                .collect()
        };

        LevelData {
            map_width: self.map_width,
            walls: layer(self.ground, ActorKind::Wall),
            coins: layer(self.coins, ActorKind::Coin),
            enemies: layer(self.enemies, ActorKind::Enemy),
            hazards: layer(self.dont_touch, ActorKind::Hazard),
            bounce_pads: layer(self.trampolines, ActorKind::BouncePad),
            ladders: layer(self.ladders, ActorKind::Ladder),
            background: layer(self.background, ActorKind::Decor),
            foreground: layer(self.foreground, ActorKind::Decor),
        }
    }
}

/// Directory of `level_<n>.json` files
#[derive(Debug, Clone)]
pub struct LevelDirectory {
    root: PathBuf,
}

impl LevelDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, level: u32) -> PathBuf {
        self.root.join(format!("level_{level}.json"))
    }

    pub fn contains(&self, level: u32) -> bool {
        self.path_for(level).is_file()
    }

    pub fn load(&self, level: u32) -> Result<LevelData, LevelError> {
        let path = self.path_for(level);
        if !path.is_file() {
            return Err(LevelError::NotFound(level));
        }
        let level_data = read_level_file(&path)?.into_level();
        log::info!("Loaded level {} from {}", level, path.display());
        Ok(level_data)
    }
}

fn read_level_file(path: &Path) -> Result<LevelFile, LevelError> {
    let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| LevelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Columns at the start of every generated map that are always safe ground
const SAFE_COLUMNS: i32 = 10;

/// Generate a playable level. The same seed and level always give the same map.
pub fn generate_level(level: u32, seed: u64) -> LevelData {
    let level_seed = (level as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(seed);
    let mut rng = Pcg32::seed_from_u64(level_seed);

    let map_width = level.saturating_mul(10).saturating_add(60).min(160);
    let mut data = LevelData {
        map_width,
        ..Default::default()
    };

    let mut col = 0;
    while col < map_width as i32 {
        // Pits and spikes only once the player has room to land
        if col >= SAFE_COLUMNS && col < map_width as i32 - 3 && rng.random_range(0..100) < 8 {
            let width = rng.random_range(1..=2);
            let spiked = rng.random_bool(0.5);
            for c in col..col + width {
                if spiked {
                    data.hazards.push(grid_tile(ActorKind::Hazard, c, 0));
                }
            }
            col += width;
            continue;
        }

        data.walls.push(grid_tile(ActorKind::Wall, col, 0));
        if rng.random_range(0..100) < 15 {
            data.coins.push(grid_tile(ActorKind::Coin, col, 1));
        }
        if rng.random_range(0..100) < 10 {
            data.background.push(grid_tile(ActorKind::Decor, col, 1));
        }
        col += 1;
    }

    // Floating platforms with a row of coins on top
    let mut platform_col = SAFE_COLUMNS + rng.random_range(0..4);
    while platform_col < map_width as i32 - 8 {
        let row = rng.random_range(3..=5);
        let len = rng.random_range(3..=5);
        for c in platform_col..platform_col + len {
            data.walls.push(grid_tile(ActorKind::Wall, c, row));
            data.coins.push(grid_tile(ActorKind::Coin, c, row + 1));
        }
        // A ladder up to every other platform
        if rng.random_bool(0.5) {
            for r in 1..=row {
                data.ladders.push(grid_tile(ActorKind::Ladder, platform_col - 1, r));
            }
        }
        platform_col += len + rng.random_range(6..12);
    }

    // Patrolling enemies standing on the ground, kept away from the start
    let mut enemy_col = SAFE_COLUMNS + 5;
    while enemy_col < map_width as i32 - 5 {
        let pos = grid_center(enemy_col, 1);
        let span = 3.0 * GRID_PIXEL_SIZE;
        let speed = if rng.random_bool(0.5) { 2.0 } else { -2.0 };
        let enemy = Actor::tile(ActorKind::Enemy, pos)
            .with_velocity(Vec2::new(speed, 0.0))
            .with_patrol(Some(pos.x - span), Some(pos.x + span));
        data.enemies.push(enemy);
        enemy_col += rng.random_range(12..20);
    }

    let pad_col = map_width as i32 / 2;
    data.bounce_pads.push(grid_tile(ActorKind::BouncePad, pad_col, 1));

    log::debug!(
        "Generated level {} (seed {}): {} walls, {} coins, {} enemies",
        level,
        seed,
        data.walls.len(),
        data.coins.len(),
        data.enemies.len()
    );
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_level_is_deterministic() {
        let a = generate_level(2, 42);
        let b = generate_level(2, 42);
        assert_eq!(a, b);
        assert_ne!(a, generate_level(3, 42));
    }

    #[test]
    fn test_generated_level_has_safe_start() {
        let data = generate_level(1, 7);
        for col in 0..SAFE_COLUMNS {
            let center = grid_center(col, 0);
            assert!(data.walls.iter().any(|w| w.pos == center), "no ground at column {col}");
        }
        assert!(data.validate(1).is_ok());
        assert_eq!(data.end_of_map(), 70.0 * GRID_PIXEL_SIZE);
    }

    #[test]
    fn test_level_file_layers() {
        let json = r#"{
            "map_width": 20,
            "ground": [{"col": 0, "row": 0}, {"col": 1, "row": 0}],
            "enemies": [{"col": 5, "row": 1, "change_x": 2.0, "boundary_left": 200.0}],
            "dont_touch": [{"col": 8, "row": 0}]
        }"#;
        let file: LevelFile = serde_json::from_str(json).unwrap();
        let data = file.into_level();

        assert_eq!(data.walls.len(), 2);
        assert_eq!(data.walls[1].pos, Vec2::new(96.0, 32.0));
        assert_eq!(data.enemies[0].vel, Vec2::new(2.0, 0.0));
        assert_eq!(data.enemies[0].boundary_left, Some(200.0));
        assert_eq!(data.enemies[0].boundary_right, None);
        assert_eq!(data.hazards[0].kind, ActorKind::Hazard);
        assert!(data.coins.is_empty());
    }

    #[test]
    fn test_missing_ground_is_rejected() {
        let data = LevelData {
            map_width: 10,
            ..Default::default()
        };
        assert!(matches!(data.validate(4), Err(LevelError::Invalid { level: 4, .. })));
    }

    #[test]
    fn test_directory_reports_missing_level() {
        let dir = LevelDirectory::new(std::env::temp_dir().join("super-joana-no-such-dir"));
        assert!(matches!(dir.load(3), Err(LevelError::NotFound(3))));
    }

    #[test]
    fn test_directory_reports_parse_error() {
        let root = std::env::temp_dir().join(format!("super-joana-levels-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        let dir = LevelDirectory::new(root.clone());
        std::fs::write(dir.path_for(1), "{ not json").unwrap();

        let result = dir.load(1);
        std::fs::remove_dir_all(&root).ok();
        assert!(matches!(result, Err(LevelError::Parse { .. })));
    }
}
