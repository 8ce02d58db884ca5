//! Marrow - Entry Point
//!
//! Demo host for the anatomy core: assembles a humanoid on the authority,
//! runs breathing against a local oxygen pool, severs a limb and finally
//! the head, and prints what the boundary collaborators observed.

use marrow::body::{Body, DamageKind, DamageQuantity, LayerKind, PartKind};
use marrow::boundary::{LocalBoundary, LocalSubstancePool, SubstanceKind, SubstancePool};
use marrow::core::error::Result;
use marrow::core::types::{EntityId, MindId};
use marrow::physiology::{update_breathing, Lungs};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("marrow=debug")
        .init();

    tracing::info!("Marrow demo host starting...");

    marrow::core::config::config().validate()?;

    let mut boundary = LocalBoundary::new();
    let observer = boundary.hub.join();

    let creature = EntityId::new();
    let mind = MindId::new();
    boundary.minds.register_mind(creature, mind);

    let (mut body, head, arm, lungs_part) = assemble_humanoid(&mut boundary, creature)?;
    tracing::info!(parts = body.part_count(), "assembled humanoid");

    // Breathe for a few seconds of simulated time
    let mut pool = LocalSubstancePool::new().with_quantity(SubstanceKind::Oxygen, 2.0);
    let mut lungs = Lungs::new(lungs_part);
    for _ in 0..12 {
        if let Some(event) = lungs.tick(&boundary.authority, 0.25, &mut pool) {
            tracing::info!(intake = ?event.intake, "breath");
        }
    }
    update_breathing(&mut lungs, &boundary.authority, &body, &pool);
    println!(
        "Breathing: {:?} (oxygen {:.1}, needed {:.1})",
        lungs.breathing,
        pool.quantity(SubstanceKind::Oxygen),
        body.sum_oxygen_needs()
    );

    println!("\n{}", body.describe(arm));

    // Crush the arm's bone until it severs; the hand falls with it
    body.try_inflict_damage(
        &mut boundary.ctx(),
        arm,
        LayerKind::Bone,
        DamageQuantity::new(DamageKind::Crush, 150.0),
    );
    println!(
        "\nAfter severing the arm: {} parts left, {} detached objects spawned",
        body.part_count(),
        boundary.spawner.spawned.len()
    );

    // Take the head off; the mind moves into the spawned head creature
    body.try_inflict_damage(
        &mut boundary.ctx(),
        head,
        LayerKind::Bone,
        DamageQuantity::new(DamageKind::Slash, 150.0),
    );
    match boundary.minds.controlled_entity(mind) {
        Some(entity) => println!("Mind now controls {:?}", entity),
        None => println!("Mind lost its body"),
    }
    println!(
        "Observer received {} replication messages",
        boundary.hub.drain(observer).len()
    );

    Ok(())
}

fn assemble_humanoid(
    boundary: &mut LocalBoundary,
    creature: EntityId,
) -> Result<(Body, marrow::core::types::PartId, marrow::core::types::PartId, marrow::core::types::PartId)> {
    let mut body = Body::new(creature);
    let mut ctx = boundary.ctx();

    let torso = body.insert_part(&mut ctx, "torso", PartKind::Torso, None)?;
    let head = body.insert_part(&mut ctx, "head", PartKind::Head, Some(torso))?;
    let lungs = body.insert_part(&mut ctx, "lungs", PartKind::Lungs, Some(torso))?;

    let left_arm = body.insert_part(&mut ctx, "left arm", PartKind::Limb, Some(torso))?;
    body.insert_part(&mut ctx, "left hand", PartKind::Limb, Some(left_arm))?;
    let right_arm = body.insert_part(&mut ctx, "right arm", PartKind::Limb, Some(torso))?;
    body.insert_part(&mut ctx, "right hand", PartKind::Limb, Some(right_arm))?;
    for side in ["left", "right"] {
        let leg = body.insert_part(&mut ctx, format!("{side} leg"), PartKind::Limb, Some(torso))?;
        body.insert_part(&mut ctx, format!("{side} foot"), PartKind::Limb, Some(leg))?;
    }

    Ok((body, head, left_arm, lungs))
}
