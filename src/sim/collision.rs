//! Collision queries between actors and containers
//!
//! Plain overlap tests on the current frame positions. Nothing is swept, so a
//! fast bolt can pass through a thin tile between two frames; per-frame speeds
//! stay well under a tile so this does not show up in play.
//!
//! Queries never mutate. They return matched ids in container order so the
//! caller can remove actors afterwards without invalidating the match set.

use super::actor::{Aabb, Actor, ActorId};
use super::container::Container;

/// Ids of every actor in `container` overlapping `actor`, in insertion order
pub fn overlaps(actor: &Actor, container: &Container) -> Vec<ActorId> {
    overlaps_box(&actor.bounds(), container)
}

/// Ids of every actor in `container` overlapping an arbitrary box
pub fn overlaps_box(bounds: &Aabb, container: &Container) -> Vec<ActorId> {
    container
        .iter()
        .filter(|other| bounds.intersects(&other.bounds()))
        .map(|other| other.id)
        .collect()
}

/// Whether `actor` overlaps anything in `container`
pub fn overlaps_any(actor: &Actor, container: &Container) -> bool {
    let bounds = actor.bounds();
    container
        .iter()
        .any(|other| bounds.intersects(&other.bounds()))
}

/// First match in insertion order
pub fn first_overlap<'a>(actor: &Actor, container: &'a Container) -> Option<&'a Actor> {
    let bounds = actor.bounds();
    container
        .iter()
        .find(|other| bounds.intersects(&other.bounds()))
}
