//! Severing and detachment cascade
//!
//! Removing a part detaches the entire subtree rooted at it: the part runs
//! its own single-part removal (hide, detach hook), then every child is
//! removed recursively in reverse insertion order, severed or not.
//!
//! Detachment behavior dispatches on [`PartKind`]: the default hook spawns
//! an ownerless detached representation of the part; the head override
//! additionally hands the controlling identity over to the newly spawned
//! head creature and broadcasts a buffered deactivate-body effect.

use crate::body::part::{Body, PartKind};
use crate::body::saved::SavedBodyPart;
use crate::boundary::{Effect, ServerCtx};
use crate::core::types::PartId;

/// Remove a part and its whole subtree from the creature's live tree.
pub(crate) fn remove_body_part(body: &mut Body, ctx: &mut ServerCtx, part: PartId) {
    let children = match body.part(part) {
        Some(p) => p.children().to_vec(),
        // Already torn out by an earlier pass of the cascade
        None => return,
    };
    remove_single(body, ctx, part);
    for &child in children.iter().rev() {
        remove_body_part(body, ctx, child);
    }
}

fn remove_single(body: &mut Body, ctx: &mut ServerCtx, part: PartId) {
    let kind = match body.part(part) {
        Some(p) if !p.is_detached() => p.kind(),
        // Idempotent: a second detachment attempt is a no-op
        _ => return,
    };
    ctx.visuals.hide(part);
    match kind {
        PartKind::Head => detach_head(body, ctx, part),
        _ => detach_default(body, ctx, part),
    }
}

/// Default detach hook: spawn an ownerless standalone representation of
/// this part (children spawn their own through the cascade), then remove
/// the part from the live tree.
fn detach_default(body: &mut Body, ctx: &mut ServerCtx, part: PartId) {
    let Some(snapshot) = SavedBodyPart::snapshot_shallow(body, part) else {
        return;
    };
    if let Some(p) = body.part_mut(part) {
        p.mark_detached();
    }
    let spawned = ctx.spawner.spawn_standalone(&snapshot);
    tracing::debug!(?part, entity = ?spawned, name = %snapshot.name, "spawned detached body part");
    // The part left the tree; observers (late joiners included) must not
    // keep reconstructing the old linkage
    ctx.replicator.replicate_parent(part, None);
    body.unlink_and_remove(part);
}

/// Head detach hook. When detached, a standalone head creature spawns and
/// the player's mind moves into it, so the player can keep playing as a
/// head (death is near though).
fn detach_head(body: &mut Body, ctx: &mut ServerCtx, part: PartId) {
    // Children go first, so a severed head carries no limbs
    let children = match body.part(part) {
        Some(p) => p.children().to_vec(),
        None => return,
    };
    for &child in children.iter().rev() {
        remove_body_part(body, ctx, child);
    }

    let Some(snapshot) = SavedBodyPart::snapshot_shallow(body, part) else {
        return;
    };
    if let Some(p) = body.part_mut(part) {
        p.mark_detached();
    }

    let head_entity = ctx.spawner.spawn_standalone(&snapshot);
    let original = body.entity();

    if let Some(mind) = ctx.minds.controlling_mind(original) {
        tracing::info!(?mind, from = ?original, to = ?head_entity, "transferring controlling identity to detached head");
        ctx.minds.transfer_identity(original, head_entity);
        ctx.minds.revoke_remote_control(original);
        ctx.minds.route_control(original, head_entity);
    }

    // The whole original body goes inert, for current observers and for
    // anyone who joins later. TODO: ragdoll the body and disable selected
    // functionality instead of deactivating it outright.
    ctx.replicator
        .broadcast_effect(Effect::DeactivateBody { entity: original }, true);

    ctx.replicator.replicate_parent(part, None);
    body.unlink_and_remove(part);
}
