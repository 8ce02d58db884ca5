//! Spawn collaborator
//!
//! Detached body parts and head-creatures alike enter the world through a
//! single spawn primitive; spawned objects start ownerless.

use crate::body::saved::SavedBodyPart;
use crate::core::types::EntityId;

/// World-object spawning the core calls into on detachment.
pub trait Spawner {
    /// Spawn a new, independent world object built from the given saved
    /// anatomy (layer set with accumulated damage plus child linkage).
    /// The object starts with no owner.
    fn spawn_standalone(&mut self, template: &SavedBodyPart) -> EntityId;
}

/// In-memory spawner that records every spawn for inspection.
#[derive(Default)]
pub struct RecordingSpawner {
    pub spawned: Vec<(EntityId, SavedBodyPart)>,
}

impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity most recently spawned, if any.
    pub fn last_spawned(&self) -> Option<EntityId> {
        self.spawned.last().map(|(entity, _)| *entity)
    }
}

impl Spawner for RecordingSpawner {
    fn spawn_standalone(&mut self, template: &SavedBodyPart) -> EntityId {
        let entity = EntityId::new();
        self.spawned.push((entity, template.clone()));
        entity
    }
}
