use crate::{
    animation::anim::{Animate, AnimationTarget},
    foundation::ids::AnimationId,
};

/// Insertion-ordered collection of active animations owned by a sprite.
///
/// Animations that stop on their own stay registered until removed.
#[derive(Debug, Default)]
pub struct AnimationSet {
    next_id: u64,
    entries: Vec<(AnimationId, Box<dyn Animate>)>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, animation: Box<dyn Animate>) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, animation));
        id
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<Box<dyn Animate>> {
        let idx = self.entries.iter().position(|(k, _)| *k == id)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: AnimationId) -> Option<&dyn Animate> {
        self.entries
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, a)| a.as_ref())
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut (dyn Animate + 'static)> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == id)
            .map(|(_, a)| a.as_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Number of registered animations that are still playing.
    pub fn playing(&self) -> usize {
        self.entries.iter().filter(|(_, a)| a.is_playing()).count()
    }

    /// Update every animation in insertion order against `target`.
    pub fn update_all(&mut self, timestamp: f64, target: &mut dyn AnimationTarget) {
        for (_, anim) in &mut self.entries {
            anim.update(timestamp, target);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/set.rs"]
mod tests;
