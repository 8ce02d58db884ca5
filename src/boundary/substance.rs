//! Substance-pool collaborator
//!
//! The full substance-transport simulation lives outside this core; the
//! anatomy only reads and increments one pooled quantity (oxygen in the
//! circulatory reservoir).

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Named substances a pool can hold. Only oxygen matters to the anatomy
/// core today; transport of anything else lives with the host simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstanceKind {
    Oxygen,
}

/// A named quantity store, queried and incremented by physiology.
pub trait SubstancePool {
    fn quantity(&self, kind: SubstanceKind) -> f32;
    fn add(&mut self, kind: SubstanceKind, amount: f32);
}

/// In-memory substance pool for the demo host and tests.
#[derive(Debug, Default)]
pub struct LocalSubstancePool {
    quantities: AHashMap<SubstanceKind, f32>,
}

impl LocalSubstancePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quantity(mut self, kind: SubstanceKind, amount: f32) -> Self {
        self.quantities.insert(kind, amount);
        self
    }
}

impl SubstancePool for LocalSubstancePool {
    fn quantity(&self, kind: SubstanceKind) -> f32 {
        self.quantities.get(&kind).copied().unwrap_or(0.0)
    }

    fn add(&mut self, kind: SubstanceKind, amount: f32) {
        *self.quantities.entry(kind).or_insert(0.0) += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_reads_zero() {
        let pool = LocalSubstancePool::new();
        assert_eq!(pool.quantity(SubstanceKind::Oxygen), 0.0);
    }

    #[test]
    fn test_add_accumulates() {
        let mut pool = LocalSubstancePool::new().with_quantity(SubstanceKind::Oxygen, 1.0);
        pool.add(SubstanceKind::Oxygen, 0.4);
        assert!((pool.quantity(SubstanceKind::Oxygen) - 1.4).abs() < f32::EPSILON);
    }
}
