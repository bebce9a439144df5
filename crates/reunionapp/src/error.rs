use crate::model::Collection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReunionError {
    /// The backing store could not be reached (transport or disk failure).
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Item not found in {collection}: {id}")]
    NotFound { collection: Collection, id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl ReunionError {
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        ReunionError::NotFound {
            collection,
            id: id.into(),
        }
    }

    pub fn unavailable(cause: impl std::fmt::Display) -> Self {
        ReunionError::StoreUnavailable(cause.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReunionError>;
