//! Persisted anatomical state
//!
//! The saved shape of a body part: its layer set with accumulated damage
//! per kind, plus child and internal linkage. Enough to rebuild an
//! equivalent part tree, and the template handed to the spawn collaborator
//! when a detached duplicate enters the world.

use serde::{Deserialize, Serialize};

use crate::body::damage::DamageKind;
use crate::body::layer::{BodyLayer, LayerKind};
use crate::body::part::{Body, PartKind};
use crate::core::error::Result;
use crate::core::types::PartId;

/// Saved state of one body layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLayer {
    pub kind: LayerKind,
    pub max_damage: f32,
    pub oxygen_need: f32,
    pub damages: Vec<(DamageKind, f32)>,
}

/// Saved state of a body part and its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBodyPart {
    pub name: String,
    pub kind: PartKind,
    pub layers: Vec<SavedLayer>,
    pub children: Vec<SavedBodyPart>,
    pub internals: Vec<SavedBodyPart>,
}

impl SavedBodyPart {
    /// Snapshot a part with its full subtree (children and internals).
    pub fn snapshot(body: &Body, part: PartId) -> Option<SavedBodyPart> {
        let p = body.part(part)?;
        Some(SavedBodyPart {
            name: p.name().to_string(),
            kind: p.kind(),
            layers: p.layers().iter().map(snapshot_layer).collect(),
            children: p
                .children()
                .iter()
                .filter_map(|&child| Self::snapshot(body, child))
                .collect(),
            internals: p
                .internals()
                .iter()
                .filter_map(|&internal| Self::snapshot(body, internal))
                .collect(),
        })
    }

    /// Snapshot a single part with its internals but none of its children.
    /// Used when a severed part spawns its own detached representation
    /// while each child spawns separately through the cascade.
    pub(crate) fn snapshot_shallow(body: &Body, part: PartId) -> Option<SavedBodyPart> {
        let p = body.part(part)?;
        Some(SavedBodyPart {
            name: p.name().to_string(),
            kind: p.kind(),
            layers: p.layers().iter().map(snapshot_layer).collect(),
            children: Vec::new(),
            internals: p
                .internals()
                .iter()
                .filter_map(|&internal| Self::snapshot(body, internal))
                .collect(),
        })
    }

    /// Serialize the saved subtree to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a saved subtree from JSON.
    pub fn from_json(json: &str) -> Result<SavedBodyPart> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild a layer from its saved state, damage totals included.
    pub(crate) fn restore_layer(saved: &SavedLayer) -> BodyLayer {
        let mut layer = match saved.kind {
            LayerKind::Circulatory => BodyLayer::circulatory(saved.oxygen_need),
            kind => BodyLayer::new(kind),
        }
        .with_capacity(saved.max_damage);
        for (kind, amount) in &saved.damages {
            layer.restore_damage(*kind, *amount);
        }
        layer
    }
}

fn snapshot_layer(layer: &BodyLayer) -> SavedLayer {
    SavedLayer {
        kind: layer.kind(),
        max_damage: layer.max_damage(),
        oxygen_need: layer.oxygen_need(),
        damages: layer.damage_pairs(),
    }
}
