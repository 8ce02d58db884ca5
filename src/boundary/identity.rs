//! Identity/control collaborator
//!
//! A "mind" is the association between a player and the creature entity
//! they control. Head detachment transfers the mind from the original
//! creature to the newly spawned head entity.

use ahash::{AHashMap, AHashSet};

use crate::core::types::{EntityId, MindId};

/// Identity and control-routing bookkeeping the core calls into.
pub trait MindDirectory {
    /// The mind currently controlling an entity, if any.
    fn controlling_mind(&self, entity: EntityId) -> Option<MindId>;

    /// Move the controlling mind from one entity to another.
    /// The destination becomes player-controlled.
    fn transfer_identity(&mut self, from: EntityId, to: EntityId);

    /// Revoke an entity's remote-control authorization.
    fn revoke_remote_control(&mut self, entity: EntityId);

    /// Update routing so control directed at `from` reaches `to`.
    fn route_control(&mut self, from: EntityId, to: EntityId);
}

/// In-memory mind directory for the demo host and tests.
#[derive(Default)]
pub struct LocalMindDirectory {
    minds: AHashMap<EntityId, MindId>,
    remote_controllable: AHashSet<EntityId>,
    routes: AHashMap<EntityId, EntityId>,
}

impl LocalMindDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mind as controlling an entity (grants remote control).
    pub fn register_mind(&mut self, entity: EntityId, mind: MindId) {
        self.minds.insert(entity, mind);
        self.remote_controllable.insert(entity);
    }

    pub fn is_remotely_controllable(&self, entity: EntityId) -> bool {
        self.remote_controllable.contains(&entity)
    }

    /// The entity a given mind currently controls, if any.
    pub fn controlled_entity(&self, mind: MindId) -> Option<EntityId> {
        self.minds
            .iter()
            .find(|(_, m)| **m == mind)
            .map(|(e, _)| *e)
    }

    /// Where control directed at an entity is currently routed.
    pub fn route_for(&self, entity: EntityId) -> Option<EntityId> {
        self.routes.get(&entity).copied()
    }
}

impl MindDirectory for LocalMindDirectory {
    fn controlling_mind(&self, entity: EntityId) -> Option<MindId> {
        self.minds.get(&entity).copied()
    }

    fn transfer_identity(&mut self, from: EntityId, to: EntityId) {
        if let Some(mind) = self.minds.remove(&from) {
            self.minds.insert(to, mind);
            self.remote_controllable.insert(to);
        }
    }

    fn revoke_remote_control(&mut self, entity: EntityId) {
        self.remote_controllable.remove(&entity);
    }

    fn route_control(&mut self, from: EntityId, to: EntityId) {
        self.routes.insert(from, to);
    }
}
