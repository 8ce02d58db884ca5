//! Authority capability token
//!
//! The original design guarded every mutating method with an ambient
//! "is this the server" runtime check. Here the constraint lives in the
//! type system instead: mutations require a reference to an [`Authority`]
//! token that only the authoritative host constructs.

/// Proof that the caller executes on the single authoritative context
/// for a creature.
///
/// Deliberately neither `Clone`, `Copy` nor `Default`: the hosting server
/// loop constructs exactly one with [`Authority::assume`] and lends it
/// into each mutation. Observer-side code has no way to obtain one.
#[derive(Debug)]
pub struct Authority {
    _private: (),
}

impl Authority {
    /// Assume the authoritative role. Call once from the server host.
    pub fn assume() -> Self {
        Self { _private: () }
    }
}
