//! Replication/authority boundary
//!
//! Everything the anatomy core needs from the hosting game server is
//! expressed as a small set of collaborator traits: visual hide/show,
//! world-object spawning, identity (mind) bookkeeping, substance pools
//! and state replication. The core never touches engine state directly.
//!
//! In-memory implementations of each trait live alongside the traits;
//! the demo host runs on them and tests assert against their records.

pub mod authority;
pub mod identity;
pub mod replication;
pub mod spawn;
pub mod substance;
pub mod visual;

pub use authority::Authority;
pub use identity::{LocalMindDirectory, MindDirectory};
pub use replication::{Effect, ObserverId, ReplicationHub, ReplicationMessage, Replicator};
pub use spawn::{RecordingSpawner, Spawner};
pub use substance::{LocalSubstancePool, SubstanceKind, SubstancePool};
pub use visual::{RecordingVisuals, VisualSink};

/// Execution context for authority-side mutations.
///
/// Every mutating entry point of the anatomy core takes one of these;
/// holding it proves the call site runs on the authority and provides
/// the collaborators the mutation may need to call out to.
pub struct ServerCtx<'a> {
    pub authority: &'a Authority,
    pub visuals: &'a mut dyn VisualSink,
    pub spawner: &'a mut dyn Spawner,
    pub minds: &'a mut dyn MindDirectory,
    pub replicator: &'a mut dyn Replicator,
}

/// All in-memory collaborators bundled together, for the demo host and
/// for tests that need a full boundary without a real server behind it.
pub struct LocalBoundary {
    pub authority: Authority,
    pub visuals: RecordingVisuals,
    pub spawner: RecordingSpawner,
    pub minds: LocalMindDirectory,
    pub hub: ReplicationHub,
}

impl Default for LocalBoundary {
    fn default() -> Self {
        Self {
            authority: Authority::assume(),
            visuals: RecordingVisuals::default(),
            spawner: RecordingSpawner::default(),
            minds: LocalMindDirectory::default(),
            hub: ReplicationHub::default(),
        }
    }
}

impl LocalBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a fresh execution context over the bundled collaborators.
    pub fn ctx(&mut self) -> ServerCtx<'_> {
        ServerCtx {
            authority: &self.authority,
            visuals: &mut self.visuals,
            spawner: &mut self.spawner,
            minds: &mut self.minds,
            replicator: &mut self.hub,
        }
    }
}
