//! Respiration: periodic breathing against the circulatory oxygen pool
//!
//! Lungs breathe on a fixed interval derived from a breaths-per-minute
//! frequency. Each breath adds a constant oxygen intake to the circulatory
//! reservoir unless the reservoir is already above its buffer capacity; a
//! breath event is signaled either way so observers can animate and play
//! audio. Breathing classification is driven externally by summing oxygen
//! needs across the creature; the lungs only store the result.

use serde::{Deserialize, Serialize};

use crate::body::part::Body;
use crate::boundary::{Authority, SubstanceKind, SubstancePool};
use crate::core::config::config;
use crate::core::types::PartId;

/// How breathing currently feels for the creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreathingState {
    Nice,
    Difficult,
    Suffocating,
}

/// Signal that one breath happened. `intake` is the oxygen actually taken
/// in, or None when the reservoir was already full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathEvent {
    pub part: PartId,
    pub intake: Option<f32>,
}

/// Respiration state attached to a creature's lungs part.
#[derive(Debug, Clone)]
pub struct Lungs {
    part: PartId,
    pub breathing: BreathingState,
    /// Inspirations and expirations per minute
    breath_frequency: f32,
    /// Elapsed time since the last breath
    timer: f32,
    /// Oxygen added per breath
    /// TODO: take the intake from the atmospherics simulation when the
    /// atmos container API lands, instead of a constant
    intake: f32,
    /// Reservoir level above which a breath takes in nothing
    max_oxygen_buffer: f32,
}

impl Lungs {
    /// Lungs for the given part, tuned from the global health config.
    pub fn new(part: PartId) -> Self {
        let cfg = config();
        Self {
            part,
            breathing: BreathingState::Nice,
            breath_frequency: cfg.breath_frequency,
            timer: 0.0,
            intake: cfg.oxygen_intake,
            max_oxygen_buffer: cfg.max_oxygen_buffer,
        }
    }

    pub fn part(&self) -> PartId {
        self.part
    }

    /// Interval between breaths; effectively infinite at zero frequency.
    pub fn seconds_between_breaths(&self) -> f32 {
        if self.breath_frequency > 0.0 {
            60.0 / self.breath_frequency
        } else {
            f32::MAX
        }
    }

    /// Advance the breath timer by `dt` seconds and breathe once when the
    /// interval elapses. Synchronous check-and-maybe-mutate, driven by the
    /// authority's polling loop.
    pub fn tick(
        &mut self,
        auth: &Authority,
        dt: f32,
        pool: &mut dyn SubstancePool,
    ) -> Option<BreathEvent> {
        self.timer += dt;
        if self.timer > self.seconds_between_breaths() {
            self.timer = 0.0;
            Some(self.breathe(auth, pool))
        } else {
            None
        }
    }

    /// Perform one breath against the circulatory oxygen reservoir.
    pub fn breathe(&mut self, _auth: &Authority, pool: &mut dyn SubstancePool) -> BreathEvent {
        let current = pool.quantity(SubstanceKind::Oxygen);
        let intake = if current > self.max_oxygen_buffer {
            None
        } else {
            pool.add(SubstanceKind::Oxygen, self.intake);
            Some(self.intake)
        };
        BreathEvent {
            part: self.part,
            intake,
        }
    }

    /// Classify breathing from available oxygen against the summed need.
    pub fn set_breathing_state(&mut self, _auth: &Authority, available_oxygen: f32, needed: f32) {
        let safe = config().safe_oxygen_factor;
        self.breathing = if available_oxygen > safe * needed {
            BreathingState::Nice
        } else if available_oxygen > needed {
            BreathingState::Difficult
        } else {
            BreathingState::Suffocating
        };
    }
}

/// Aggregate the creature's oxygen needs and update the lungs'
/// breathing classification against the pool's current oxygen level.
pub fn update_breathing(
    lungs: &mut Lungs,
    auth: &Authority,
    body: &Body,
    pool: &dyn SubstancePool,
) {
    let available = pool.quantity(SubstanceKind::Oxygen);
    let needed = body.sum_oxygen_needs();
    lungs.set_breathing_state(auth, available, needed);
}
