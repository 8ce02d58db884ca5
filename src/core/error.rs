use thiserror::Error;

#[derive(Error, Debug)]
pub enum BodyError {
    #[error("Body part not found: {0:?}")]
    PartNotFound(crate::core::types::PartId),

    #[error("Cyclic parent assignment: {parent:?} is a descendant of {part:?}")]
    CyclicParent {
        part: crate::core::types::PartId,
        parent: crate::core::types::PartId,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BodyError>;
