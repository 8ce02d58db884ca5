//! Visual/representation collaborator
//!
//! The core never touches rendering state; it only tells the
//! representation layer which parts to hide when they sever.

use crate::core::types::PartId;

/// Visual representation hooks. `hide` is expected to be idempotent.
pub trait VisualSink {
    fn hide(&mut self, part: PartId);
}

/// In-memory visual sink that records every hide call.
#[derive(Debug, Default)]
pub struct RecordingVisuals {
    pub hidden: Vec<PartId>,
}

impl RecordingVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self, part: PartId) -> bool {
        self.hidden.contains(&part)
    }
}

impl VisualSink for RecordingVisuals {
    fn hide(&mut self, part: PartId) {
        self.hidden.push(part);
    }
}
