//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Stable iteration order (container insertion order)
//! - No rendering or platform dependencies; sound and level data come
//!   through the `Engine` trait

pub mod actor;
pub mod camera;
pub mod collision;
pub mod container;
pub mod input;
pub mod lifecycle;
pub mod physics;
pub mod state;
pub mod tick;

pub use actor::{Aabb, Actor, ActorId, ActorKind, Animation, Hitbox};
pub use camera::{Margins, Viewport};
pub use collision::{first_overlap, overlaps, overlaps_any, overlaps_box};
pub use container::Container;
pub use input::{Action, InputEvent, handle_input};
pub use physics::{PhysicsStepper, StepReport};
pub use state::{DeathCause, Facing, GameEvent, GamePhase, GameState, Player, World};
pub use tick::tick;
