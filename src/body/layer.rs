//! Body layers: the physiological facets of a body part
//!
//! Every part carries an ordered set of layers (muscle, bone, circulatory,
//! nerve, organ). Each layer accumulates damage per kind independently and
//! reports destruction once the total reaches its capacity. The bone layer
//! is special only in that its destruction is the severing trigger; the
//! other kinds are pure accumulators at this level, and any kind-specific
//! gameplay effect is layered on top by external systems.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::body::damage::{DamageKind, DamageQuantity};
use crate::core::config::config;
use crate::core::types::PartId;

/// Closed set of layer kinds. Kind checks go through this tag, never
/// through run-time type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Muscle,
    Bone,
    Circulatory,
    Nerve,
    Organ,
}

/// A damage-accumulating layer owned by a body part.
#[derive(Debug, Clone)]
pub struct BodyLayer {
    kind: LayerKind,
    damages: AHashMap<DamageKind, f32>,
    max_damage: f32,
    /// How much oxygen this layer's tissue consumes; summed across the
    /// creature to classify breathing. Zero for non-circulatory layers.
    oxygen_need: f32,
    /// Back-reference to the owning part. Relational only, set on attach.
    owner: Option<PartId>,
}

impl BodyLayer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            damages: AHashMap::new(),
            max_damage: config().default_layer_capacity,
            oxygen_need: 0.0,
            owner: None,
        }
    }

    pub fn muscle() -> Self {
        Self::new(LayerKind::Muscle)
    }

    pub fn bone() -> Self {
        Self::new(LayerKind::Bone)
    }

    pub fn nerve() -> Self {
        Self::new(LayerKind::Nerve)
    }

    pub fn organ() -> Self {
        Self::new(LayerKind::Organ)
    }

    /// Circulatory layer with the oxygen need of the part it irrigates
    /// (5.0 for a head, 3.0 for lungs, less for limbs).
    pub fn circulatory(oxygen_need: f32) -> Self {
        Self {
            oxygen_need,
            ..Self::new(LayerKind::Circulatory)
        }
    }

    /// Override the damage capacity (layers default to the configured one).
    pub fn with_capacity(mut self, max_damage: f32) -> Self {
        self.max_damage = max_damage;
        self
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn owner(&self) -> Option<PartId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, part: PartId) {
        self.owner = Some(part);
    }

    pub fn oxygen_need(&self) -> f32 {
        self.oxygen_need
    }

    /// Apply a damage quantity to this layer's running totals.
    pub fn inflict_damage(&mut self, quantity: DamageQuantity) {
        *self.damages.entry(quantity.kind).or_insert(0.0) += quantity.amount;
    }

    /// Accumulated damage of one kind
    pub fn damage_of_kind(&self, kind: DamageKind) -> f32 {
        self.damages.get(&kind).copied().unwrap_or(0.0)
    }

    /// Accumulated damage across all kinds
    pub fn total_damage(&self) -> f32 {
        self.damages.values().sum()
    }

    pub fn max_damage(&self) -> f32 {
        self.max_damage
    }

    /// Totals may overflow the capacity; destruction reports against it.
    pub fn is_destroyed(&self) -> bool {
        self.total_damage() >= self.max_damage
    }

    /// Accumulated damage as (kind, amount) pairs, for persistence.
    pub fn damage_pairs(&self) -> Vec<(DamageKind, f32)> {
        self.damages.iter().map(|(k, v)| (*k, *v)).collect()
    }

    pub(crate) fn restore_damage(&mut self, kind: DamageKind, amount: f32) {
        *self.damages.entry(kind).or_insert(0.0) += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_accumulates_per_kind() {
        let mut layer = BodyLayer::muscle();
        layer.inflict_damage(DamageQuantity::new(DamageKind::Slash, 10.0));
        layer.inflict_damage(DamageQuantity::new(DamageKind::Slash, 5.0));
        layer.inflict_damage(DamageQuantity::new(DamageKind::Burn, 2.0));

        assert_eq!(layer.damage_of_kind(DamageKind::Slash), 15.0);
        assert_eq!(layer.damage_of_kind(DamageKind::Burn), 2.0);
        assert_eq!(layer.total_damage(), 17.0);
    }

    #[test]
    fn test_destroyed_at_capacity() {
        let mut layer = BodyLayer::bone().with_capacity(20.0);
        layer.inflict_damage(DamageQuantity::new(DamageKind::Crush, 19.9));
        assert!(!layer.is_destroyed());
        layer.inflict_damage(DamageQuantity::new(DamageKind::Crush, 0.1));
        assert!(layer.is_destroyed());
    }

    #[test]
    fn test_overflow_still_reports_destroyed() {
        let mut layer = BodyLayer::organ().with_capacity(10.0);
        layer.inflict_damage(DamageQuantity::new(DamageKind::Toxic, 50.0));
        assert!(layer.is_destroyed());
        assert_eq!(layer.total_damage(), 50.0);
    }

    #[test]
    fn test_circulatory_carries_oxygen_need() {
        let layer = BodyLayer::circulatory(3.0);
        assert_eq!(layer.oxygen_need(), 3.0);
        assert_eq!(BodyLayer::muscle().oxygen_need(), 0.0);
    }
}
