//! Integration tests for respiration against a creature's oxygen needs

use marrow::body::{Body, PartKind};
use marrow::boundary::{LocalBoundary, LocalSubstancePool, SubstanceKind, SubstancePool};
use marrow::core::types::EntityId;
use marrow::physiology::{update_breathing, BreathingState, Lungs};

fn creature_with_lungs(boundary: &mut LocalBoundary) -> (Body, Lungs) {
    let mut body = Body::new(EntityId::new());
    let mut ctx = boundary.ctx();
    let torso = body.insert_part(&mut ctx, "torso", PartKind::Torso, None).unwrap();
    let lungs_part = body
        .insert_part(&mut ctx, "lungs", PartKind::Lungs, Some(torso))
        .unwrap();
    body.insert_part(&mut ctx, "head", PartKind::Head, Some(torso)).unwrap();
    let lungs = Lungs::new(lungs_part);
    (body, lungs)
}

#[test]
fn breathing_refills_reservoir_until_buffer_cap() {
    let mut boundary = LocalBoundary::new();
    let (_body, mut lungs) = creature_with_lungs(&mut boundary);
    let mut pool = LocalSubstancePool::new().with_quantity(SubstanceKind::Oxygen, 9.9);

    // First breath: 9.9 <= 10.0, intake happens
    let first = lungs.breathe(&boundary.authority, &mut pool);
    assert_eq!(first.intake, Some(0.4));
    assert!((pool.quantity(SubstanceKind::Oxygen) - 10.3).abs() < 1e-4);

    // Second breath: 10.3 > 10.0, no intake but the breath still fires
    let second = lungs.breathe(&boundary.authority, &mut pool);
    assert_eq!(second.intake, None);
    assert!((pool.quantity(SubstanceKind::Oxygen) - 10.3).abs() < 1e-4);
}

#[test]
fn ticking_over_a_minute_breathes_about_sixty_times() {
    let mut boundary = LocalBoundary::new();
    let (_body, mut lungs) = creature_with_lungs(&mut boundary);
    let mut pool = LocalSubstancePool::new();

    let mut breaths = 0;
    for _ in 0..600 {
        if lungs.tick(&boundary.authority, 0.1, &mut pool).is_some() {
            breaths += 1;
        }
    }

    // 60 breaths/minute; the > comparison costs one step per interval
    assert!((54..=60).contains(&breaths), "breaths = {breaths}");
}

#[test]
fn classification_follows_creature_oxygen_needs() {
    let mut boundary = LocalBoundary::new();
    let (body, mut lungs) = creature_with_lungs(&mut boundary);

    // torso 4.0 + lungs 3.0 + head 5.0 + brain 1.0
    let needed = body.sum_oxygen_needs();
    assert_eq!(needed, 13.0);

    let plenty = LocalSubstancePool::new().with_quantity(SubstanceKind::Oxygen, needed * 2.0);
    update_breathing(&mut lungs, &boundary.authority, &body, &plenty);
    assert_eq!(lungs.breathing, BreathingState::Nice);

    let tight = LocalSubstancePool::new().with_quantity(SubstanceKind::Oxygen, needed + 0.5);
    update_breathing(&mut lungs, &boundary.authority, &body, &tight);
    assert_eq!(lungs.breathing, BreathingState::Difficult);

    let starved = LocalSubstancePool::new().with_quantity(SubstanceKind::Oxygen, needed * 0.5);
    update_breathing(&mut lungs, &boundary.authority, &body, &starved);
    assert_eq!(lungs.breathing, BreathingState::Suffocating);
}

#[test]
fn losing_parts_lowers_oxygen_needs() {
    let mut boundary = LocalBoundary::new();
    let mut body = Body::new(EntityId::new());
    let torso = body
        .insert_part(&mut boundary.ctx(), "torso", PartKind::Torso, None)
        .unwrap();
    let arm = body
        .insert_part(&mut boundary.ctx(), "arm", PartKind::Limb, Some(torso))
        .unwrap();

    let before = body.sum_oxygen_needs();
    body.destroy_body_part(&mut boundary.ctx(), arm);
    let after = body.sum_oxygen_needs();

    assert!(after < before);
    assert_eq!(after, 4.0); // torso circulatory only
}
