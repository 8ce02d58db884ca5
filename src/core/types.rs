//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for world entities (creatures and spawned
/// standalone representations alike)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a controlling identity (player "mind")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MindId(pub Uuid);

impl MindId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MindId {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of a body part within its creature's part table.
///
/// Parent and child links between parts are stored as `PartId`s, never
/// as owning references, so a detached subtree can be torn out as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartId(pub u32);

/// Game tick counter (simulation time unit)
pub type Tick = u64;
