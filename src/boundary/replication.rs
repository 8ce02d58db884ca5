//! Authority-to-observer state replication
//!
//! The core replicates two things: the latest value of each part's parent
//! linkage, and one-shot effects. Effects broadcast with
//! `buffer_for_late_joiners` must be re-delivered to observers who connect
//! after the effect fired, exactly as if they had witnessed it live.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, PartId};

/// One-shot effects broadcast through the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// The creature's whole body goes inert (fires on head detachment).
    /// Placeholder granularity: a later refinement may ragdoll the body
    /// and disable selected functionality instead of deactivating it.
    DeactivateBody { entity: EntityId },
}

/// What an observer receives, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplicationMessage {
    ParentLink {
        part: PartId,
        parent: Option<PartId>,
    },
    Effect(Effect),
}

/// Replication primitives the anatomy core calls into.
pub trait Replicator {
    /// Replicate the latest parent linkage of a part to all observers.
    fn replicate_parent(&mut self, part: PartId, parent: Option<PartId>);

    /// Broadcast a one-shot effect. When `buffer_for_late_joiners` is set,
    /// the last instance of the effect is retained and delivered to every
    /// observer that joins afterwards.
    fn broadcast_effect(&mut self, effect: Effect, buffer_for_late_joiners: bool);
}

/// Handle for a connected observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

/// In-memory replication hub with per-observer ordered queues.
///
/// Guarantees the boundary contract: ordered delivery of each replicated
/// value's latest state, and exactly-once redelivery of buffered effects
/// to late joiners.
#[derive(Default)]
pub struct ReplicationHub {
    next_observer: u32,
    queues: AHashMap<ObserverId, Vec<ReplicationMessage>>,
    parent_links: AHashMap<PartId, Option<PartId>>,
    buffered_effects: Vec<Effect>,
}

impl ReplicationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a new observer. It immediately receives the latest state of
    /// every replicated parent link plus any buffered one-shot effects.
    pub fn join(&mut self) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;

        let mut queue: Vec<ReplicationMessage> = self
            .parent_links
            .iter()
            .map(|(part, parent)| ReplicationMessage::ParentLink {
                part: *part,
                parent: *parent,
            })
            .collect();
        queue.extend(
            self.buffered_effects
                .iter()
                .cloned()
                .map(ReplicationMessage::Effect),
        );

        self.queues.insert(id, queue);
        id
    }

    /// Take everything delivered to an observer since the last drain.
    pub fn drain(&mut self, observer: ObserverId) -> Vec<ReplicationMessage> {
        self.queues
            .get_mut(&observer)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn observer_count(&self) -> usize {
        self.queues.len()
    }
}

impl Replicator for ReplicationHub {
    fn replicate_parent(&mut self, part: PartId, parent: Option<PartId>) {
        self.parent_links.insert(part, parent);
        for queue in self.queues.values_mut() {
            queue.push(ReplicationMessage::ParentLink { part, parent });
        }
    }

    fn broadcast_effect(&mut self, effect: Effect, buffer_for_late_joiners: bool) {
        for queue in self.queues.values_mut() {
            queue.push(ReplicationMessage::Effect(effect.clone()));
        }
        if buffer_for_late_joiners {
            // Retain only the last instance of each effect variant
            let tag = std::mem::discriminant(&effect);
            self.buffered_effects
                .retain(|e| std::mem::discriminant(e) != tag);
            self.buffered_effects.push(effect);
        }
    }
}
