//! Damage kinds and typed damage quantities
//!
//! A `DamageQuantity` is the atomic unit every body layer consumes: an
//! immutable (kind, amount) pair with no identity of its own.

use serde::{Deserialize, Serialize};

/// The kinds of damage the anatomy distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    Crush,
    Slash,
    Puncture,
    Burn,
    Toxic,
    Shock,
    /// Oxygen deprivation
    Oxy,
}

impl DamageKind {
    /// Returns all damage kinds
    pub fn all() -> [DamageKind; 7] {
        [
            DamageKind::Crush,
            DamageKind::Slash,
            DamageKind::Puncture,
            DamageKind::Burn,
            DamageKind::Toxic,
            DamageKind::Shock,
            DamageKind::Oxy,
        ]
    }
}

/// A typed quantity of damage. Amounts are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageQuantity {
    pub kind: DamageKind,
    pub amount: f32,
}

impl DamageQuantity {
    /// Create a damage quantity; negative amounts clamp to zero.
    pub fn new(kind: DamageKind, amount: f32) -> Self {
        Self {
            kind,
            amount: amount.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_kind_count() {
        assert_eq!(DamageKind::all().len(), 7);
    }

    #[test]
    fn test_negative_amount_clamps_to_zero() {
        let q = DamageQuantity::new(DamageKind::Slash, -5.0);
        assert_eq!(q.amount, 0.0);
    }
}
