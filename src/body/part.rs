//! Body parts and the per-creature part table
//!
//! A creature's anatomy is a tree of parts keyed by [`PartId`] in a single
//! table. The parent relation is semantic ("closest toward the brain"), and
//! does not have to mirror any visual hierarchy. All links are ids into the
//! table, so detaching a subtree tears it out as a unit with no dangling
//! ownership.
//!
//! Every mutating operation takes the authority context; observers never
//! mutate, they receive replicated state through the boundary.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::body::damage::DamageQuantity;
use crate::body::detach;
use crate::body::layer::{BodyLayer, LayerKind};
use crate::body::saved::SavedBodyPart;
use crate::boundary::{Authority, ServerCtx};
use crate::core::error::{BodyError, Result};
use crate::core::types::{EntityId, PartId};

/// Anatomical kinds with their own assembly/detachment behavior.
///
/// Detachment dispatches on this tag (default behavior plus a head
/// override) instead of open-ended subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    Head,
    /// Internal sub-part of the head representing cognition
    Brain,
    Torso,
    Limb,
    Lungs,
    Generic,
}

impl PartKind {
    /// Initial layer set attached when a part of this kind is assembled.
    /// Circulatory layers carry the oxygen need of the tissue they irrigate.
    fn initial_layers(self) -> Vec<BodyLayer> {
        match self {
            PartKind::Head => vec![
                BodyLayer::muscle(),
                BodyLayer::bone(),
                BodyLayer::circulatory(5.0),
                BodyLayer::nerve(),
            ],
            PartKind::Brain => vec![
                BodyLayer::nerve(),
                BodyLayer::organ(),
                BodyLayer::circulatory(1.0),
            ],
            PartKind::Torso => vec![
                BodyLayer::muscle(),
                BodyLayer::bone(),
                BodyLayer::circulatory(4.0),
                BodyLayer::nerve(),
                BodyLayer::organ(),
            ],
            // Lungs have no bone layer: they can be destroyed, never severed
            PartKind::Lungs => vec![
                BodyLayer::muscle(),
                BodyLayer::circulatory(3.0),
                BodyLayer::nerve(),
                BodyLayer::organ(),
            ],
            PartKind::Limb | PartKind::Generic => vec![
                BodyLayer::muscle(),
                BodyLayer::bone(),
                BodyLayer::circulatory(2.0),
                BodyLayer::nerve(),
            ],
        }
    }
}

/// A node in the anatomical tree.
#[derive(Debug, Clone)]
pub struct BodyPart {
    name: String,
    kind: PartKind,
    parent: Option<PartId>,
    children: Vec<PartId>,
    /// Sub-parts carried inside this part (e.g. the brain in the head).
    /// They travel with the part and are not visited by the child cascade.
    internals: Vec<PartId>,
    layers: Vec<BodyLayer>,
    detached: bool,
    /// Opaque handle to the external collider/hitbox, carried not read
    collider: Option<u64>,
}

impl BodyPart {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PartKind {
        self.kind
    }

    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    pub fn children(&self) -> &[PartId] {
        &self.children
    }

    pub fn internals(&self) -> &[PartId] {
        &self.internals
    }

    pub fn layers(&self) -> &[BodyLayer] {
        &self.layers
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn collider(&self) -> Option<u64> {
        self.collider
    }

    pub fn set_collider(&mut self, handle: u64) {
        self.collider = Some(handle);
    }

    /// Sum of accumulated damage across all layers
    pub fn total_damage(&self) -> f32 {
        self.layers.iter().map(|l| l.total_damage()).sum()
    }

    /// Sum of layer capacities
    pub fn max_damage(&self) -> f32 {
        self.layers.iter().map(|l| l.max_damage()).sum()
    }

    /// A part is severed iff its bone layer (if present) is destroyed
    pub fn is_severed(&self) -> bool {
        self.layer_of_kind(LayerKind::Bone)
            .map_or(false, |bone| bone.is_destroyed())
    }

    /// Crushed, burned to dust: more total damage than the part can carry
    pub fn is_destroyed(&self) -> bool {
        self.total_damage() > self.max_damage()
    }

    pub fn contains_layer(&self, kind: LayerKind) -> bool {
        self.layers.iter().any(|l| l.kind() == kind)
    }

    /// First layer of the given kind, if any
    pub fn layer_of_kind(&self, kind: LayerKind) -> Option<&BodyLayer> {
        self.layers.iter().find(|l| l.kind() == kind)
    }

    /// First layer of the given kind.
    ///
    /// # Panics
    ///
    /// Panics if no layer of `kind` exists on this part; guard with
    /// [`BodyPart::contains_layer`] first.
    pub fn first_layer_of_kind(&self, kind: LayerKind) -> &BodyLayer {
        self.layer_of_kind(kind)
            .unwrap_or_else(|| panic!("part {:?} has no {:?} layer", self.name, kind))
    }

    pub(crate) fn mark_detached(&mut self) {
        self.detached = true;
    }
}

/// The part table of one creature.
pub struct Body {
    entity: EntityId,
    parts: AHashMap<PartId, BodyPart>,
    next_part: u32,
}

impl Body {
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            parts: AHashMap::new(),
            next_part: 0,
        }
    }

    /// The world entity this anatomy belongs to
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn part(&self, id: PartId) -> Option<&BodyPart> {
        self.parts.get(&id)
    }

    pub(crate) fn part_mut(&mut self, id: PartId) -> Option<&mut BodyPart> {
        self.parts.get_mut(&id)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn part_ids(&self) -> impl Iterator<Item = PartId> + '_ {
        self.parts.keys().copied()
    }

    /// Assemble a new part with its kind's initial layer set and link it
    /// under `parent`. A head additionally receives an internal brain.
    pub fn insert_part(
        &mut self,
        ctx: &mut ServerCtx,
        name: impl Into<String>,
        kind: PartKind,
        parent: Option<PartId>,
    ) -> Result<PartId> {
        let id = self.allocate(name.into(), kind, kind.initial_layers());
        if let Some(parent) = parent {
            self.set_parent(ctx, id, parent)?;
        }
        if kind == PartKind::Head {
            let brain = self.allocate("brain".to_string(), PartKind::Brain, PartKind::Brain.initial_layers());
            self.attach_internal(id, brain);
        }
        Ok(id)
    }

    /// Rebuild a part (and its subtree) from a saved anatomical state,
    /// carrying forward accumulated damage. Used when a detached duplicate
    /// is reconstructed as its own creature.
    pub fn insert_saved_part(
        &mut self,
        ctx: &mut ServerCtx,
        saved: &SavedBodyPart,
        parent: Option<PartId>,
    ) -> Result<PartId> {
        let layers = saved.layers.iter().map(SavedBodyPart::restore_layer).collect();
        let id = self.allocate(saved.name.clone(), saved.kind, layers);
        if let Some(parent) = parent {
            self.set_parent(ctx, id, parent)?;
        }
        for child in &saved.children {
            self.insert_saved_part(ctx, child, Some(id))?;
        }
        for internal in &saved.internals {
            let internal_id = self.insert_saved_part(ctx, internal, None)?;
            self.attach_internal(id, internal_id);
        }
        Ok(id)
    }

    fn allocate(&mut self, name: String, kind: PartKind, mut layers: Vec<BodyLayer>) -> PartId {
        let id = PartId(self.next_part);
        self.next_part += 1;
        for layer in &mut layers {
            layer.set_owner(id);
        }
        self.parts.insert(
            id,
            BodyPart {
                name,
                kind,
                parent: None,
                children: Vec::new(),
                internals: Vec::new(),
                layers,
                detached: false,
                collider: None,
            },
        );
        id
    }

    fn attach_internal(&mut self, owner: PartId, internal: PartId) {
        if let Some(part) = self.parts.get_mut(&internal) {
            part.parent = Some(owner);
        }
        if let Some(part) = self.parts.get_mut(&owner) {
            part.internals.push(internal);
        }
    }

    /// The single central parent assignment.
    ///
    /// Rejected (logged, no state change) when the candidate parent is the
    /// part itself or one of its descendants, which would create a cycle.
    /// The new linkage is replicated to observers on success.
    pub fn set_parent(&mut self, ctx: &mut ServerCtx, part: PartId, parent: PartId) -> Result<()> {
        if !self.parts.contains_key(&part) {
            return Err(BodyError::PartNotFound(part));
        }
        if !self.parts.contains_key(&parent) {
            return Err(BodyError::PartNotFound(parent));
        }
        if part == parent || self.is_descendant(part, parent) {
            tracing::warn!(
                ?part,
                ?parent,
                "rejected parent assignment: candidate is part or descendant of part"
            );
            return Err(BodyError::CyclicParent { part, parent });
        }

        if let Some(old_parent) = self.parts.get(&part).and_then(|p| p.parent) {
            if let Some(old) = self.parts.get_mut(&old_parent) {
                old.children.retain(|c| *c != part);
            }
        }
        if let Some(p) = self.parts.get_mut(&part) {
            p.parent = Some(parent);
        }
        if let Some(p) = self.parts.get_mut(&parent) {
            p.children.push(part);
        }

        tracing::debug!(?part, ?parent, "parent body part assigned");
        ctx.replicator.replicate_parent(part, Some(parent));
        Ok(())
    }

    /// Is `candidate` reachable from `root` through children or internals?
    pub fn is_descendant(&self, root: PartId, candidate: PartId) -> bool {
        let Some(part) = self.parts.get(&root) else {
            return false;
        };
        part.children
            .iter()
            .chain(part.internals.iter())
            .any(|&child| child == candidate || self.is_descendant(child, candidate))
    }

    /// Attach a layer to a part, setting its owner back-reference.
    ///
    /// Attaching a second layer of a kind already present is not rejected;
    /// lookups always resolve to the first of a kind.
    pub fn try_add_body_layer(
        &mut self,
        _auth: &Authority,
        part: PartId,
        mut layer: BodyLayer,
    ) -> bool {
        let Some(p) = self.parts.get_mut(&part) else {
            return false;
        };
        layer.set_owner(part);
        p.layers.push(layer);
        true
    }

    /// Remove the first layer of the given kind from a part. Removing a
    /// layer that is not present is a no-op returning false.
    pub fn remove_body_layer(&mut self, _auth: &Authority, part: PartId, kind: LayerKind) -> bool {
        let Some(p) = self.parts.get_mut(&part) else {
            return false;
        };
        match p.layers.iter().position(|l| l.kind() == kind) {
            Some(index) => {
                p.layers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Inflict a damage quantity on the first layer of the given kind.
    ///
    /// Returns false with no state change when the part has no such layer.
    /// On success the part's severing state is re-evaluated, and a newly
    /// severed part detaches with its whole subtree.
    pub fn try_inflict_damage(
        &mut self,
        ctx: &mut ServerCtx,
        part: PartId,
        layer_kind: LayerKind,
        quantity: DamageQuantity,
    ) -> bool {
        let Some(p) = self.parts.get_mut(&part) else {
            return false;
        };
        let Some(layer) = p.layers.iter_mut().find(|l| l.kind() == layer_kind) else {
            return false;
        };
        layer.inflict_damage(quantity);
        self.check_severed(ctx, part);
        true
    }

    /// Inflict the same quantity on every layer of a part (generalized
    /// trauma), then re-evaluate severing.
    pub fn inflict_damage_to_all_layers(
        &mut self,
        ctx: &mut ServerCtx,
        part: PartId,
        quantity: DamageQuantity,
    ) {
        let Some(p) = self.parts.get_mut(&part) else {
            return;
        };
        for layer in &mut p.layers {
            layer.inflict_damage(quantity);
        }
        self.check_severed(ctx, part);
    }

    /// As [`Body::inflict_damage_to_all_layers`] but sparing one layer kind
    /// (certain attack types leave e.g. the bone untouched).
    pub fn inflict_damage_to_all_layers_except(
        &mut self,
        ctx: &mut ServerCtx,
        part: PartId,
        skip: LayerKind,
        quantity: DamageQuantity,
    ) {
        let Some(p) = self.parts.get_mut(&part) else {
            return;
        };
        for layer in p.layers.iter_mut().filter(|l| l.kind() != skip) {
            layer.inflict_damage(quantity);
        }
        self.check_severed(ctx, part);
    }

    fn check_severed(&mut self, ctx: &mut ServerCtx, part: PartId) {
        let severed = self.parts.get(&part).map_or(false, |p| p.is_severed());
        if severed {
            tracing::info!(?part, "body part severed");
            detach::remove_body_part(self, ctx, part);
        }
    }

    /// Destroy a part outright (complete crushing, burning to dust).
    /// Runs the same removal cascade as severing: the part and its whole
    /// subtree detach into standalone world objects.
    pub fn destroy_body_part(&mut self, ctx: &mut ServerCtx, part: PartId) {
        detach::remove_body_part(self, ctx, part);
    }

    pub fn contains_layer(&self, part: PartId, kind: LayerKind) -> bool {
        self.parts.get(&part).map_or(false, |p| p.contains_layer(kind))
    }

    pub fn layer_of_kind(&self, part: PartId, kind: LayerKind) -> Option<&BodyLayer> {
        self.parts.get(&part).and_then(|p| p.layer_of_kind(kind))
    }

    pub fn total_damage(&self, part: PartId) -> f32 {
        self.parts.get(&part).map_or(0.0, |p| p.total_damage())
    }

    pub fn max_damage(&self, part: PartId) -> f32 {
        self.parts.get(&part).map_or(0.0, |p| p.max_damage())
    }

    pub fn is_severed(&self, part: PartId) -> bool {
        self.parts.get(&part).map_or(false, |p| p.is_severed())
    }

    /// Total oxygen need across every layer of every live part. Drives the
    /// breathing classification through the respiration aggregator.
    pub fn sum_oxygen_needs(&self) -> f32 {
        self.parts
            .values()
            .flat_map(|p| p.layers.iter())
            .map(|l| l.oxygen_need())
            .sum()
    }

    /// Diagnostic human-readable summary of a part: layer kinds, child
    /// names, parent name.
    ///
    /// # Panics
    ///
    /// Panics if the part does not exist or has no parent; only call this
    /// on linked, non-root parts.
    pub fn describe(&self, part: PartId) -> String {
        let p = self
            .parts
            .get(&part)
            .unwrap_or_else(|| panic!("describe: unknown part {part:?}"));

        let mut description = String::new();
        for layer in &p.layers {
            description.push_str(&format!("Layer {:?}\n", layer.kind()));
        }
        description.push_str("Child connected body parts:\n");
        for child in &p.children {
            if let Some(c) = self.parts.get(child) {
                description.push_str(c.name());
                description.push('\n');
            }
        }
        description.push_str("Parent body part:\n");
        let parent = p
            .parent
            .and_then(|id| self.parts.get(&id))
            .unwrap_or_else(|| panic!("describe: part {part:?} has no parent"));
        description.push_str(parent.name());
        description
    }

    /// Unlink a part from its parent and remove it (with its internals)
    /// from the table. Returns the removed part.
    pub(crate) fn unlink_and_remove(&mut self, id: PartId) -> Option<BodyPart> {
        if let Some(parent) = self.parts.get(&id).and_then(|p| p.parent) {
            if let Some(p) = self.parts.get_mut(&parent) {
                p.children.retain(|c| *c != id);
            }
        }
        let part = self.parts.remove(&id)?;
        for internal in &part.internals {
            self.parts.remove(internal);
        }
        Some(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::damage::DamageKind;
    use crate::boundary::LocalBoundary;

    fn torso_with_arm() -> (LocalBoundary, Body, PartId, PartId) {
        let mut boundary = LocalBoundary::new();
        let mut body = Body::new(EntityId::new());
        let torso = body
            .insert_part(&mut boundary.ctx(), "torso", PartKind::Torso, None)
            .unwrap();
        let arm = body
            .insert_part(&mut boundary.ctx(), "left arm", PartKind::Limb, Some(torso))
            .unwrap();
        (boundary, body, torso, arm)
    }

    #[test]
    fn test_total_damage_sums_layers() {
        let (mut boundary, mut body, _torso, arm) = torso_with_arm();
        body.try_inflict_damage(
            &mut boundary.ctx(),
            arm,
            LayerKind::Muscle,
            DamageQuantity::new(DamageKind::Slash, 12.0),
        );
        body.try_inflict_damage(
            &mut boundary.ctx(),
            arm,
            LayerKind::Nerve,
            DamageQuantity::new(DamageKind::Shock, 3.0),
        );

        let part = body.part(arm).unwrap();
        let layer_sum: f32 = part.layers().iter().map(|l| l.total_damage()).sum();
        assert_eq!(part.total_damage(), layer_sum);
        assert_eq!(part.total_damage(), 15.0);

        let capacity_sum: f32 = part.layers().iter().map(|l| l.max_damage()).sum();
        assert_eq!(part.max_damage(), capacity_sum);
    }

    #[test]
    fn test_missing_layer_damage_fails_without_mutation() {
        let mut boundary = LocalBoundary::new();
        let mut body = Body::new(EntityId::new());
        let lungs = body
            .insert_part(&mut boundary.ctx(), "lungs", PartKind::Lungs, None)
            .unwrap();

        // Lungs carry no bone layer
        let applied = body.try_inflict_damage(
            &mut boundary.ctx(),
            lungs,
            LayerKind::Bone,
            DamageQuantity::new(DamageKind::Crush, 50.0),
        );

        assert!(!applied);
        assert_eq!(body.total_damage(lungs), 0.0);
    }

    #[test]
    fn test_descendant_rejected_as_parent() {
        let (mut boundary, mut body, torso, arm) = torso_with_arm();
        let hand = body
            .insert_part(&mut boundary.ctx(), "left hand", PartKind::Limb, Some(arm))
            .unwrap();

        let result = body.set_parent(&mut boundary.ctx(), torso, hand);
        assert!(matches!(result, Err(BodyError::CyclicParent { .. })));

        // No state change: hand still hangs off the arm, torso still root
        assert_eq!(body.part(torso).unwrap().parent(), None);
        assert_eq!(body.part(hand).unwrap().parent(), Some(arm));
        assert!(!body.part(hand).unwrap().children().contains(&torso));
    }

    #[test]
    fn test_self_parent_rejected() {
        let (mut boundary, mut body, torso, _arm) = torso_with_arm();
        assert!(body.set_parent(&mut boundary.ctx(), torso, torso).is_err());
    }

    #[test]
    fn test_reparent_unlinks_old_parent() {
        let (mut boundary, mut body, torso, arm) = torso_with_arm();
        let neck = body
            .insert_part(&mut boundary.ctx(), "neck", PartKind::Generic, Some(torso))
            .unwrap();

        body.set_parent(&mut boundary.ctx(), arm, neck).unwrap();
        assert!(!body.part(torso).unwrap().children().contains(&arm));
        assert!(body.part(neck).unwrap().children().contains(&arm));
    }

    #[test]
    fn test_duplicate_layer_kind_is_not_rejected() {
        let (boundary, mut body, _torso, arm) = torso_with_arm();
        assert!(body.try_add_body_layer(&boundary.authority, arm, BodyLayer::muscle()));
        let muscles = body
            .part(arm)
            .unwrap()
            .layers()
            .iter()
            .filter(|l| l.kind() == LayerKind::Muscle)
            .count();
        assert_eq!(muscles, 2);
    }

    #[test]
    fn test_remove_absent_layer_is_noop() {
        let mut boundary = LocalBoundary::new();
        let mut body = Body::new(EntityId::new());
        let lungs = body
            .insert_part(&mut boundary.ctx(), "lungs", PartKind::Lungs, None)
            .unwrap();

        assert!(!body.remove_body_layer(&boundary.authority, lungs, LayerKind::Bone));
        assert!(body.remove_body_layer(&boundary.authority, lungs, LayerKind::Organ));
        assert!(!body.contains_layer(lungs, LayerKind::Organ));
    }

    #[test]
    fn test_head_gets_internal_brain() {
        let (mut boundary, mut body, torso, _arm) = torso_with_arm();
        let head = body
            .insert_part(&mut boundary.ctx(), "head", PartKind::Head, Some(torso))
            .unwrap();

        let internals = body.part(head).unwrap().internals();
        assert_eq!(internals.len(), 1);
        let brain = body.part(internals[0]).unwrap();
        assert_eq!(brain.kind(), PartKind::Brain);
        assert_eq!(brain.parent(), Some(head));
        // Internals are carried, not cascaded
        assert!(!body.part(head).unwrap().children().contains(&internals[0]));
    }

    #[test]
    fn test_damage_to_all_layers_except_spares_kind() {
        let (mut boundary, mut body, _torso, arm) = torso_with_arm();
        body.inflict_damage_to_all_layers_except(
            &mut boundary.ctx(),
            arm,
            LayerKind::Bone,
            DamageQuantity::new(DamageKind::Burn, 10.0),
        );

        let part = body.part(arm).unwrap();
        for layer in part.layers() {
            if layer.kind() == LayerKind::Bone {
                assert_eq!(layer.total_damage(), 0.0);
            } else {
                assert_eq!(layer.total_damage(), 10.0);
            }
        }
    }

    #[test]
    fn test_describe_lists_layers_children_and_parent() {
        let (mut boundary, mut body, _torso, arm) = torso_with_arm();
        body.insert_part(&mut boundary.ctx(), "left hand", PartKind::Limb, Some(arm))
            .unwrap();

        let description = body.describe(arm);
        assert!(description.contains("Layer Muscle"));
        assert!(description.contains("Layer Bone"));
        assert!(description.contains("left hand"));
        assert!(description.contains("torso"));
    }

    #[test]
    #[should_panic(expected = "has no parent")]
    fn test_describe_root_panics() {
        let (_boundary, body, torso, _arm) = torso_with_arm();
        body.describe(torso);
    }

    #[test]
    #[should_panic(expected = "no Bone layer")]
    fn test_first_layer_of_kind_panics_when_absent() {
        let mut boundary = LocalBoundary::new();
        let mut body = Body::new(EntityId::new());
        let lungs = body
            .insert_part(&mut boundary.ctx(), "lungs", PartKind::Lungs, None)
            .unwrap();
        body.part(lungs).unwrap().first_layer_of_kind(LayerKind::Bone);
    }

    #[test]
    fn test_oxygen_needs_sum_across_parts() {
        let (_boundary, body, _torso, _arm) = torso_with_arm();
        // torso circulatory 4.0 + limb circulatory 2.0
        assert_eq!(body.sum_oxygen_needs(), 6.0);
    }
}
