pub mod damage;
pub mod detach;
pub mod layer;
pub mod part;
pub mod saved;

pub use damage::{DamageKind, DamageQuantity};
pub use layer::{BodyLayer, LayerKind};
pub use part::{Body, BodyPart, PartKind};
pub use saved::{SavedBodyPart, SavedLayer};
