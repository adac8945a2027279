use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Root not found: {name}")]
    RootNotFound { name: String },

    #[error("Offset {offset} is out of bounds (length {length})")]
    PositionOutOfBounds { offset: usize, length: usize },

    #[error("Malformed position: {message}")]
    MalformedPosition { message: String },

    #[error("Version mismatch: document is at {expected}, operation assumes {found}")]
    VersionMismatch { expected: u64, found: u64 },

    #[error("{class_name} cannot be reversed")]
    NotReversible { class_name: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    pub fn root_not_found(name: impl Into<String>) -> Self {
        Self::RootNotFound { name: name.into() }
    }

    pub fn malformed_position(message: impl Into<String>) -> Self {
        Self::MalformedPosition {
            message: message.into(),
        }
    }
}
