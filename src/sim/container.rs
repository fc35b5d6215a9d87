//! Ordered actor containers
//!
//! Each container holds one gameplay category. Insertion order is preserved
//! and is the tie-break whenever several actors match the same query.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};

/// An ordered group of actors of one category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Container {
    actors: Vec<Actor>,
}

impl Container {
    pub fn new() -> Self {
        Self { actors: Vec::new() }
    }

    pub fn push(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    /// Remove an actor by id. Removing an id that is already gone is a no-op.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id == id)?;
        Some(self.actors.remove(index))
    }

    /// Remove every listed actor, returning how many were present
    pub fn remove_all(&mut self, ids: &[ActorId]) -> usize {
        let before = self.actors.len();
        self.actors.retain(|a| !ids.contains(&a.id));
        before - self.actors.len()
    }

    pub fn retain(&mut self, keep: impl FnMut(&Actor) -> bool) {
        self.actors.retain(keep);
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Actor> {
        self.actors.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Ids in insertion order, for iterating while the container is mutated
    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.iter().map(|a| a.id).collect()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Actor;
    type IntoIter = std::slice::Iter<'a, Actor>;

    fn into_iter(self) -> Self::IntoIter {
        self.actors.iter()
    }
}
